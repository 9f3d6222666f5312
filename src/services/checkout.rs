// src/services/checkout.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    middleware::session::SessionContext,
    models::{
        business::{Business, PaymentMethodKind},
        cart::CartSummary,
        order::{NewOrder, NewOrderItem, Order, OrderDetail},
    },
    services::{
        cart::CartService,
        notifier::{NotifyError, StaffNotifier},
        payment::PaymentMethodValidator,
        validate_contact, SubmissionOutcome,
    },
};

// ---
// O que o formulário de checkout envia, já desserializado
// ---
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub payment_method: PaymentMethodKind,
    /// Referência gerada pelo cliente; torna o reenvio idempotente.
    pub client_reference: Option<Uuid>,
}

// ---
// CheckoutService: valida, persiste e só então avisa
// ---
// A máquina por tentativa é Editing -> AwaitingConfirmation -> Submitting
// -> Succeeded | Failed. A confirmação é um clique explícito do cliente;
// este serviço é a fase Submitting inteira, com a ordem estrita
// persistir-depois-avisar.
#[derive(Clone)]
pub struct CheckoutService {
    cart: CartService,
    orders: Arc<dyn OrderRepository>,
    notifier: Arc<dyn StaffNotifier>,
    fallback_staff_phone: Option<String>,
}

impl CheckoutService {
    pub fn new(
        cart: CartService,
        orders: Arc<dyn OrderRepository>,
        notifier: Arc<dyn StaffNotifier>,
        fallback_staff_phone: Option<String>,
    ) -> Self {
        Self { cart, orders, notifier, fallback_staff_phone }
    }

    pub async fn submit(
        &self,
        session: &SessionContext,
        business: &Business,
        request: CheckoutRequest,
    ) -> Result<SubmissionOutcome<Order>, AppError> {
        // Portão de confirmação: sem nome e telefone a tentativa é
        // rejeitada no lugar e nada chega à persistência.
        validate_contact(&request.customer_name, &request.customer_phone)?;

        let methods = PaymentMethodValidator::available_methods(business);
        PaymentMethodValidator::ensure_available(&methods, request.payment_method)?;

        let summary = self.cart.summary(session).await?;
        if summary.lines.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let new_order = build_order(business, &request, &summary);

        // Fase 1: persistir. Se falhar, o aviso NUNCA é disparado: a
        // equipe não pode saber de um pedido que não foi gravado.
        let order = match self.orders.insert_order_with_items(&new_order).await {
            Ok(order) => order,
            Err(e) => {
                tracing::error!("Falha ao gravar o pedido: {}", e);
                return Err(AppError::OrderNotRecorded);
            }
        };

        // Fase 2: avisar a equipe. Falha aqui não desfaz o que já foi
        // gravado; o estado parcial volta com nome próprio e o carrinho
        // fica intacto para o reenvio (idempotente pela referência).
        let message = format_order_message(business, &order, &summary);
        if let Err(e) = self.notify(business, &message).await {
            tracing::warn!("Pedido {} gravado, mas o aviso falhou: {}", order.id, e);
            return Ok(SubmissionOutcome::RecordedNotNotified(order));
        }

        // Sucesso total: o carrinho esvazia e a superfície fecha.
        if let Err(e) = self.cart.clear(session).await {
            tracing::warn!("Pedido {} enviado, mas o carrinho não esvaziou: {}", order.id, e);
        }

        Ok(SubmissionOutcome::Completed(order))
    }

    /// Consulta de confirmação (o pedido existe mesmo quando o aviso falhou).
    pub async fn find_order(&self, id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        let items = self.orders.list_items(order.id).await?;
        Ok(OrderDetail { order, items })
    }

    async fn notify(&self, business: &Business, message: &str) -> Result<(), NotifyError> {
        let phone = business
            .whatsapp_number
            .as_deref()
            .or(self.fallback_staff_phone.as_deref())
            .ok_or(NotifyError::MissingPhone)?;
        self.notifier.send_text(phone, message).await
    }
}

// Fotografa o carrinho em itens de pedido e fecha o total.
// Invariante: total_amount é exatamente a soma dos line_total.
fn build_order(business: &Business, request: &CheckoutRequest, summary: &CartSummary) -> NewOrder {
    let items: Vec<NewOrderItem> = summary
        .lines
        .iter()
        .map(|line| NewOrderItem {
            product_id: Some(line.product.id),
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            line_total: line.line_total,
            special_instructions: line.special_instructions.clone(),
        })
        .collect();

    NewOrder {
        business_id: business.id,
        client_reference: request.client_reference,
        customer_name: request.customer_name.trim().to_string(),
        customer_phone: request.customer_phone.trim().to_string(),
        customer_email: request.customer_email.clone(),
        notes: request.notes.clone(),
        payment_method: request.payment_method,
        total_amount: summary.total_price,
        items,
    }
}

pub(crate) fn format_brl(value: Decimal) -> String {
    format!("R$ {:.2}", value)
}

// Resumo formatado que a equipe recebe no WhatsApp.
fn format_order_message(business: &Business, order: &Order, summary: &CartSummary) -> String {
    let mut message = String::new();
    message.push_str(&format!("*Novo pedido* | {}\n\n", business.name));
    message.push_str(&format!(
        "Cliente: {} ({})\n",
        order.customer_name, order.customer_phone
    ));
    if let Some(email) = &order.customer_email {
        message.push_str(&format!("E-mail: {}\n", email));
    }

    message.push_str("\nItens:\n");
    for line in &summary.lines {
        message.push_str(&format!(
            "- {}x {} ({}) = {}\n",
            line.quantity,
            line.product.name,
            format_brl(line.product.price),
            format_brl(line.line_total),
        ));
        if let Some(instructions) = &line.special_instructions {
            message.push_str(&format!("  Obs: {}\n", instructions));
        }
    }

    message.push_str(&format!("\nTotal: {}\n", format_brl(order.total_amount)));
    message.push_str(&format!(
        "Pagamento: {}\n",
        order.payment_method.default_display_name()
    ));
    if let Some(notes) = &order.notes {
        message.push_str(&format!("Observações: {}\n", notes));
    }

    message
}
