// src/services/testing.rs

// Duplos de teste: fixtures e implementações em memória dos contratos de
// repositório e do canal de avisos. Os serviços rodam aqui exatamente como
// rodariam contra o Postgres e o gateway reais.

use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        cart_repo::MAX_CART_LINES, BusinessRepository, CartRepository, CatalogRepository,
        OrderRepository, ReservationRepository,
    },
    middleware::session::SessionContext,
    models::{
        business::Business,
        cart::CartLine,
        catalog::{Category, Product},
        order::{NewOrder, Order, OrderItem, OrderStatus},
        reservation::{NewReservation, Reservation, ReservationStatus},
    },
    services::notifier::{NotifyError, StaffNotifier},
};

// ---
// Fixtures
// ---

pub fn business_fixture(name: &str, slug: &str) -> Business {
    let now = Utc::now();
    Business {
        id: Uuid::new_v4(),
        owner_id: None,
        name: name.to_string(),
        slug: slug.to_string(),
        whatsapp_number: Some("+351912345678".to_string()),
        instagram: None,
        address: None,
        payment_methods: sqlx::types::Json(Vec::new()),
        created_at: now,
        updated_at: now,
    }
}

pub fn category_fixture(business_id: Uuid, name: &str, sort_order: i32) -> Category {
    let now = Utc::now();
    Category {
        id: Uuid::new_v4(),
        business_id,
        name: name.to_string(),
        sort_order,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn product_fixture(business_id: Uuid, category_id: Uuid, name: &str, price: &str) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        business_id,
        category_id,
        name: name.to_string(),
        description: None,
        price: Decimal::from_str(price).expect("preço da fixture"),
        image_url: None,
        is_vegetarian: false,
        is_vegan: false,
        is_gluten_free: false,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn session_fixture(id: &str) -> SessionContext {
    SessionContext { id: id.to_string(), generated: false }
}

// Erro padrão para simular o banco fora do ar.
fn store_down() -> AppError {
    AppError::DatabaseError(sqlx::Error::PoolClosed)
}

// ---
// FakeBusinessRepository
// ---

pub struct FakeBusinessRepository {
    businesses: Vec<Business>,
}

impl FakeBusinessRepository {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self { businesses }
    }
}

#[async_trait]
impl BusinessRepository for FakeBusinessRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError> {
        Ok(self.businesses.iter().find(|b| b.slug == slug).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Business>, AppError> {
        Ok(self
            .businesses
            .iter()
            .find(|b| b.owner_id == Some(owner_id))
            .cloned())
    }

    async fn find_first(&self) -> Result<Option<Business>, AppError> {
        Ok(self.businesses.first().cloned())
    }
}

// ---
// FakeCatalogRepository
// ---

pub struct FakeCatalogRepository {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl FakeCatalogRepository {
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self { categories, products }
    }
}

#[async_trait]
impl CatalogRepository for FakeCatalogRepository {
    async fn list_active_categories(&self, business_id: Uuid) -> Result<Vec<Category>, AppError> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.business_id == business_id && c.is_active)
            .cloned()
            .collect())
    }

    async fn list_active_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.business_id == business_id && p.is_active)
            .cloned()
            .collect())
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.products.iter().find(|p| p.id == product_id).cloned())
    }

    async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

// ---
// FakeCartRepository
// ---

#[derive(Default)]
pub struct FakeCartRepository {
    lines: Mutex<Vec<CartLine>>,
}

#[async_trait]
impl CartRepository for FakeCartRepository {
    async fn list_lines(&self, session_id: &str) -> Result<Vec<CartLine>, AppError> {
        let lines = self.lines.lock().unwrap();
        Ok(lines
            .iter()
            .filter(|l| l.session_id == session_id)
            .take(MAX_CART_LINES as usize)
            .cloned()
            .collect())
    }

    async fn find_line_for_product(
        &self,
        session_id: &str,
        product_id: Uuid,
        instructions: Option<&str>,
    ) -> Result<Option<CartLine>, AppError> {
        let lines = self.lines.lock().unwrap();
        Ok(lines
            .iter()
            .find(|l| {
                l.session_id == session_id
                    && l.product_id == product_id
                    && l.special_instructions.as_deref().unwrap_or("")
                        == instructions.unwrap_or("")
            })
            .cloned())
    }

    async fn insert_line(
        &self,
        session_id: &str,
        product_id: Uuid,
        quantity: i32,
        instructions: Option<&str>,
    ) -> Result<CartLine, AppError> {
        let now = Utc::now();
        let line = CartLine {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            product_id,
            quantity,
            special_instructions: instructions.map(ToOwned::to_owned),
            created_at: now,
            updated_at: now,
        };
        self.lines.lock().unwrap().push(line.clone());
        Ok(line)
    }

    async fn set_quantity(
        &self,
        session_id: &str,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<Option<CartLine>, AppError> {
        let mut lines = self.lines.lock().unwrap();
        let line = lines
            .iter_mut()
            .find(|l| l.session_id == session_id && l.id == line_id);
        Ok(line.map(|l| {
            l.quantity = quantity;
            l.updated_at = Utc::now();
            l.clone()
        }))
    }

    async fn delete_line(&self, session_id: &str, line_id: Uuid) -> Result<bool, AppError> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|l| !(l.session_id == session_id && l.id == line_id));
        Ok(lines.len() < before)
    }

    async fn clear(&self, session_id: &str) -> Result<u64, AppError> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|l| l.session_id != session_id);
        Ok((before - lines.len()) as u64)
    }
}

// ---
// FakeOrderRepository
// ---

pub struct FakeOrderRepository {
    orders: Mutex<Vec<Order>>,
    items: Mutex<Vec<OrderItem>>,
    fail: bool,
}

impl FakeOrderRepository {
    pub fn new(fail: bool) -> Self {
        Self { orders: Mutex::new(Vec::new()), items: Mutex::new(Vec::new()), fail }
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for FakeOrderRepository {
    async fn insert_order_with_items(&self, new_order: &NewOrder) -> Result<Order, AppError> {
        if self.fail {
            return Err(store_down());
        }

        // Mesma semântica do upsert real: referência repetida devolve o
        // pedido já gravado.
        if let Some(reference) = new_order.client_reference {
            let orders = self.orders.lock().unwrap();
            if let Some(order) = orders
                .iter()
                .find(|o| o.client_reference == Some(reference))
            {
                return Ok(order.clone());
            }
        }

        let order = Order {
            id: Uuid::new_v4(),
            business_id: new_order.business_id,
            client_reference: new_order.client_reference,
            customer_name: new_order.customer_name.clone(),
            customer_phone: new_order.customer_phone.clone(),
            customer_email: new_order.customer_email.clone(),
            notes: new_order.notes.clone(),
            payment_method: new_order.payment_method,
            total_amount: new_order.total_amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        let mut items = self.items.lock().unwrap();
        for item in &new_order.items {
            items.push(OrderItem {
                id: Uuid::new_v4(),
                order_id: order.id,
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total,
                special_instructions: item.special_instructions.clone(),
            });
        }

        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }
}

// ---
// FakeReservationRepository
// ---

pub struct FakeReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
    fail: bool,
}

impl FakeReservationRepository {
    pub fn new(fail: bool) -> Self {
        Self { reservations: Mutex::new(Vec::new()), fail }
    }

    pub fn count(&self) -> usize {
        self.reservations.lock().unwrap().len()
    }
}

#[async_trait]
impl ReservationRepository for FakeReservationRepository {
    async fn insert(&self, new_reservation: &NewReservation) -> Result<Reservation, AppError> {
        if self.fail {
            return Err(store_down());
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            business_id: new_reservation.business_id,
            customer_name: new_reservation.customer_name.clone(),
            customer_phone: new_reservation.customer_phone.clone(),
            customer_email: new_reservation.customer_email.clone(),
            party_size: new_reservation.party_size,
            reservation_date: new_reservation.reservation_date,
            reservation_time: new_reservation.reservation_time,
            special_requests: new_reservation.special_requests.clone(),
            payment_method: new_reservation.payment_method,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        };

        self.reservations.lock().unwrap().push(reservation.clone());
        Ok(reservation)
    }
}

// ---
// RecordingNotifier: o "espião" do canal de avisos
// ---

pub struct RecordingNotifier {
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(fail: bool) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StaffNotifier for RecordingNotifier {
    async fn send_text(&self, phone: &str, body: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Gateway {
                status: 502,
                message: "falha simulada do gateway".to_string(),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .push((phone.to_string(), body.to_string()));
        Ok(())
    }
}
