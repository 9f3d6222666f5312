// src/services/cart.rs

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CartRepository, CatalogRepository},
    middleware::session::SessionContext,
    models::cart::{CartLineView, CartSummary},
    models::catalog::Product,
};

// ---
// CartService: o carrinho da sessão anônima
// ---
// Todas as mutações são escopadas pelo id da sessão recebida; o serviço
// nunca toca linhas de outra sessão.
#[derive(Clone)]
pub struct CartService {
    carts: Arc<dyn CartRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { carts, catalog }
    }

    /// O carrinho como a tela consome: linhas enriquecidas com o produto e
    /// totais derivados na hora (nunca gravados).
    pub async fn summary(&self, session: &SessionContext) -> Result<CartSummary, AppError> {
        let lines = self.carts.list_lines(&session.id).await?;

        let product_ids: Vec<Uuid> = lines.iter().map(|line| line.product_id).collect();
        let products = self.catalog.find_products_by_ids(&product_ids).await?;
        let by_id: HashMap<Uuid, Product> =
            products.into_iter().map(|product| (product.id, product)).collect();

        let views = lines
            .into_iter()
            .filter_map(|line| {
                // Produto removido do catálogo depois de entrar no
                // carrinho: a linha some da exibição.
                let product = by_id.get(&line.product_id)?.clone();
                let line_total = Decimal::from(line.quantity) * product.price;
                Some(CartLineView {
                    id: line.id,
                    product,
                    quantity: line.quantity,
                    special_instructions: line.special_instructions,
                    line_total,
                })
            })
            .collect();

        Ok(CartSummary::build(views))
    }

    /// Adiciona um produto. Se já existe uma linha do mesmo produto com a
    /// mesma observação, soma a quantidade em vez de duplicar.
    pub async fn add(
        &self,
        session: &SessionContext,
        product_id: Uuid,
        quantity: i32,
        instructions: Option<String>,
    ) -> Result<CartSummary, AppError> {
        let product = self
            .catalog
            .find_product(product_id)
            .await?
            .filter(|product| product.is_active)
            .ok_or(AppError::ProductNotFound)?;

        let instructions = instructions.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match self
            .carts
            .find_line_for_product(&session.id, product.id, instructions)
            .await?
        {
            Some(line) => {
                self.carts
                    .set_quantity(&session.id, line.id, line.quantity + quantity)
                    .await?;
            }
            None => {
                self.carts
                    .insert_line(&session.id, product.id, quantity, instructions)
                    .await?;
            }
        }

        self.summary(session).await
    }

    /// Quantidade <= 0 segue pelo MESMO caminho da remoção explícita: a
    /// tela confirma com o usuário antes, nunca some com a linha calada.
    pub async fn set_quantity(
        &self,
        session: &SessionContext,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<CartSummary, AppError> {
        if quantity <= 0 {
            return self.remove(session, line_id).await;
        }

        self.carts
            .set_quantity(&session.id, line_id, quantity)
            .await?
            .ok_or(AppError::CartLineNotFound)?;

        self.summary(session).await
    }

    pub async fn remove(
        &self,
        session: &SessionContext,
        line_id: Uuid,
    ) -> Result<CartSummary, AppError> {
        let removed = self.carts.delete_line(&session.id, line_id).await?;
        if !removed {
            return Err(AppError::CartLineNotFound);
        }
        self.summary(session).await
    }

    pub async fn clear(&self, session: &SessionContext) -> Result<(), AppError> {
        self.carts.clear(&session.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        category_fixture, product_fixture, session_fixture, FakeCartRepository,
        FakeCatalogRepository,
    };
    use rust_decimal::Decimal;

    struct Setup {
        service: CartService,
        product_a: Product,
        product_b: Product,
    }

    fn setup() -> Setup {
        let business_id = Uuid::new_v4();
        let category = category_fixture(business_id, "Pizzas", 0);
        let product_a = product_fixture(business_id, category.id, "Margherita", "10.00");
        let product_b = product_fixture(business_id, category.id, "Suco de Laranja", "5.00");

        let catalog = Arc::new(FakeCatalogRepository::new(
            vec![category],
            vec![product_a.clone(), product_b.clone()],
        ));
        let carts = Arc::new(FakeCartRepository::default());

        Setup {
            service: CartService::new(carts, catalog),
            product_a,
            product_b,
        }
    }

    #[tokio::test]
    async fn totais_derivados_das_linhas() {
        // Cenário: quantidades 2 e 1, preços 10.00 e 5.00
        let setup = setup();
        let session = session_fixture("sessao-a");

        setup
            .service
            .add(&session, setup.product_a.id, 2, None)
            .await
            .expect("adiciona");
        let summary = setup
            .service
            .add(&session, setup.product_b.id, 1, None)
            .await
            .expect("adiciona");

        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_price, Decimal::new(2500, 2));
    }

    #[tokio::test]
    async fn adicionar_o_mesmo_produto_soma_na_linha_existente() {
        let setup = setup();
        let session = session_fixture("sessao-a");

        setup
            .service
            .add(&session, setup.product_a.id, 1, None)
            .await
            .expect("adiciona");
        let summary = setup
            .service
            .add(&session, setup.product_a.id, 2, None)
            .await
            .expect("adiciona de novo");

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].quantity, 3);
    }

    #[tokio::test]
    async fn observacao_diferente_cria_linha_separada() {
        let setup = setup();
        let session = session_fixture("sessao-a");

        setup
            .service
            .add(&session, setup.product_a.id, 1, None)
            .await
            .expect("adiciona");
        let summary = setup
            .service
            .add(&session, setup.product_a.id, 1, Some("sem cebola".to_string()))
            .await
            .expect("adiciona com observação");

        assert_eq!(summary.lines.len(), 2);
    }

    #[tokio::test]
    async fn quantidade_zero_remove_pelo_mesmo_caminho_da_remocao() {
        let setup = setup();
        let session = session_fixture("sessao-a");

        let summary = setup
            .service
            .add(&session, setup.product_a.id, 2, None)
            .await
            .expect("adiciona");
        let line_id = summary.lines[0].id;

        let summary = setup
            .service
            .set_quantity(&session, line_id, 0)
            .await
            .expect("zera quantidade");
        assert!(summary.lines.is_empty());

        // A linha já foi removida: repetir é o mesmo erro da remoção.
        let again = setup.service.set_quantity(&session, line_id, 0).await;
        assert!(matches!(again, Err(AppError::CartLineNotFound)));
    }

    #[tokio::test]
    async fn sessoes_diferentes_nao_enxergam_o_mesmo_carrinho() {
        let setup = setup();
        let session_a = session_fixture("sessao-a");
        let session_b = session_fixture("sessao-b");

        setup
            .service
            .add(&session_a, setup.product_a.id, 1, None)
            .await
            .expect("adiciona na sessão A");

        let summary_b = setup.service.summary(&session_b).await.expect("carrinho B");
        assert!(summary_b.lines.is_empty());
    }

    #[tokio::test]
    async fn produto_inativo_nao_entra_no_carrinho() {
        let business_id = Uuid::new_v4();
        let category = category_fixture(business_id, "Pizzas", 0);
        let mut product = product_fixture(business_id, category.id, "Margherita", "10.00");
        product.is_active = false;

        let catalog = Arc::new(FakeCatalogRepository::new(vec![category], vec![product.clone()]));
        let service = CartService::new(Arc::new(FakeCartRepository::default()), catalog);
        let session = session_fixture("sessao-a");

        let result = service.add(&session, product.id, 1, None).await;
        assert!(matches!(result, Err(AppError::ProductNotFound)));
    }

    #[tokio::test]
    async fn limpar_esvazia_somente_a_sessao_atual() {
        let setup = setup();
        let session_a = session_fixture("sessao-a");
        let session_b = session_fixture("sessao-b");

        setup
            .service
            .add(&session_a, setup.product_a.id, 1, None)
            .await
            .expect("adiciona A");
        setup
            .service
            .add(&session_b, setup.product_b.id, 1, None)
            .await
            .expect("adiciona B");

        setup.service.clear(&session_a).await.expect("limpa A");

        assert!(setup.service.summary(&session_a).await.expect("A").lines.is_empty());
        assert_eq!(setup.service.summary(&session_b).await.expect("B").lines.len(), 1);
    }
}
