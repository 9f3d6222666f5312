// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Cardápio ---
        handlers::menu::get_menu,

        // --- Carrinho ---
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::update_item,
        handlers::cart::remove_item,
        handlers::cart::clear_cart,

        // --- Checkout ---
        handlers::checkout::get_payment_methods,
        handlers::checkout::submit_checkout,
        handlers::checkout::get_order,

        // --- Reservas ---
        handlers::reservation::submit_reservation,
        handlers::reservation::get_time_slots,
    ),
    components(
        schemas(
            // --- Estabelecimento ---
            models::business::Business,
            models::business::BusinessView,
            models::business::PaymentMethodKind,
            models::business::PaymentMethodConfig,

            // --- Catálogo ---
            models::catalog::Category,
            models::catalog::Product,
            models::catalog::ProductView,
            services::catalog::Page<models::catalog::ProductView>,

            // --- Carrinho ---
            models::cart::CartLine,
            models::cart::CartLineView,
            models::cart::CartSummary,

            // --- Pedidos ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderDetail,

            // --- Reservas ---
            models::reservation::ReservationStatus,
            models::reservation::Reservation,

            // --- Pagamento ---
            services::payment::PaymentMethodDescriptor,

            // --- Payloads e respostas ---
            handlers::menu::MenuResponse,
            handlers::cart::AddCartItemPayload,
            handlers::cart::UpdateCartItemPayload,
            handlers::checkout::PaymentMethodsResponse,
            handlers::checkout::CheckoutPayload,
            handlers::checkout::CheckoutResponse,
            handlers::reservation::ReservationPayload,
            handlers::reservation::ReservationResponse,
            handlers::reservation::TimeSlotsResponse,
        )
    ),
    tags(
        (name = "Cardápio", description = "Vitrine pública do cardápio"),
        (name = "Carrinho", description = "Carrinho da sessão anônima"),
        (name = "Checkout", description = "Envio de pedidos e métodos de pagamento"),
        (name = "Reservas", description = "Reserva de mesas"),
    )
)]
pub struct ApiDoc;
