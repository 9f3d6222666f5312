// src/services/catalog.rs

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Category, Product, ProductView},
};

// ---
// Ordem curada das categorias
// ---
// A ordem do cardápio tem significado para o negócio (entrada antes de
// sobremesa), não é alfabética. Nomes fora da lista vão para o fim, com
// `sort_order` e nome como desempate.
const CURATED_CATEGORY_ORDER: &[&str] = &[
    "Entradas",
    "Pratos Principais",
    "Lanches",
    "Pizzas",
    "Massas",
    "Sobremesas",
    "Bebidas",
];

fn curated_rank(name: &str) -> usize {
    CURATED_CATEGORY_ORDER
        .iter()
        .position(|known| known.eq_ignore_ascii_case(name))
        .unwrap_or(CURATED_CATEGORY_ORDER.len())
}

/// Aplica a ordem curada a uma lista de categorias.
pub fn sort_categories(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| {
        curated_rank(&a.name)
            .cmp(&curated_rank(&b.name))
            .then(a.sort_order.cmp(&b.sort_order))
            .then(a.name.cmp(&b.name))
    });
    categories
}

// ---
// Filtro de categoria (função pura sobre a lista carregada)
// ---
// "Todas" é o filtro identidade, ordenado por nome de produto; uma
// categoria específica filtra por igualdade de id e ordena pela ordem
// curada, para a lista acompanhar o seletor de categorias.
pub fn filter_products(
    products: &[ProductView],
    filter: Option<Uuid>,
) -> Vec<ProductView> {
    let mut filtered: Vec<ProductView> = match filter {
        None => products.to_vec(),
        Some(category_id) => products
            .iter()
            .filter(|view| view.product.category_id == category_id)
            .cloned()
            .collect(),
    };

    match filter {
        None => filtered.sort_by(|a, b| a.product.name.cmp(&b.product.name)),
        Some(_) => filtered.sort_by(|a, b| {
            curated_rank(&a.category_name)
                .cmp(&curated_rank(&b.category_name))
                .then(a.product.name.cmp(&b.product.name))
        }),
    }

    filtered
}

// ---
// Paginador (puro e estável)
// ---
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 50;
const VISIBLE_PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub visible_pages: Vec<usize>,
}

/// Fatia determinística: a mesma entrada produz sempre a mesma página.
/// Página além do fim é grampeada na última; zero itens vira uma página
/// única vazia com as duas direções desabilitadas.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, current_page: usize) -> Page<T> {
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let total_items = items.len();
    let total_pages = usize::max(1, total_items.div_ceil(page_size));
    let current_page = current_page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let page_items: Vec<T> = items.iter().skip(start).take(page_size).cloned().collect();

    Page {
        items: page_items,
        current_page,
        page_size,
        total_pages,
        total_items,
        has_next: current_page < total_pages,
        has_prev: current_page > 1,
        visible_pages: visible_pages(total_pages, current_page),
    }
}

// Janela de números de página em volta da atual (1 2 [3] 4 5).
fn visible_pages(total_pages: usize, current_page: usize) -> Vec<usize> {
    let first = current_page
        .saturating_sub(VISIBLE_PAGE_WINDOW / 2)
        .max(1);
    let last = usize::min(total_pages, first + VISIBLE_PAGE_WINDOW - 1);
    let first = last.saturating_sub(VISIBLE_PAGE_WINDOW - 1).max(1);
    (first..=last).collect()
}

// ---
// CatalogService: carrega e enriquece o cardápio
// ---
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Carrega categorias e produtos do estabelecimento. As duas consultas
    /// são independentes e rodam em paralelo; a tela só fica pronta quando
    /// as duas terminam.
    pub async fn load_menu(
        &self,
        business_id: Uuid,
    ) -> Result<(Vec<Category>, Vec<ProductView>), AppError> {
        let (categories, products) = tokio::join!(
            self.catalog.list_active_categories(business_id),
            self.catalog.list_active_products(business_id),
        );
        let categories = sort_categories(categories?);
        let products = enrich_with_category_names(products?, &categories);
        Ok((categories, products))
    }
}

// O agrupamento visual precisa do nome da categoria junto do produto.
fn enrich_with_category_names(
    products: Vec<Product>,
    categories: &[Category],
) -> Vec<ProductView> {
    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();

    products
        .into_iter()
        .map(|product| {
            let category_name = names
                .get(&product.category_id)
                .map(|name| (*name).to_string())
                .unwrap_or_default();
            ProductView { product, category_name }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{category_fixture, product_fixture, FakeCatalogRepository};

    fn view(product: Product, category_name: &str) -> ProductView {
        ProductView { product, category_name: category_name.to_string() }
    }

    // ---
    // Paginação
    // ---

    #[test]
    fn pagina_nunca_excede_o_tamanho() {
        let items: Vec<i32> = (1..=23).collect();
        for page in 1..=10 {
            assert!(paginate(&items, 10, page).items.len() <= 10);
        }
    }

    #[test]
    fn concatenar_as_paginas_reproduz_a_lista_exatamente() {
        let items: Vec<i32> = (1..=23).collect();
        let first = paginate(&items, 10, 1);

        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            collected.extend(paginate(&items, 10, page).items);
        }

        assert_eq!(collected, items);
    }

    #[test]
    fn pagina_alem_do_fim_e_grampeada_na_ultima() {
        let items: Vec<i32> = (1..=23).collect();
        let page = paginate(&items, 10, 99);

        assert_eq!(page.current_page, 3);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn lista_vazia_vira_uma_pagina_unica_sem_navegacao() {
        let items: Vec<i32> = Vec::new();
        let page = paginate(&items, 10, 1);

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn mesma_entrada_produz_a_mesma_pagina() {
        let items: Vec<i32> = (1..=50).collect();
        let a = paginate(&items, 7, 4);
        let b = paginate(&items, 7, 4);
        assert_eq!(a.items, b.items);
        assert_eq!(a.visible_pages, b.visible_pages);
    }

    #[test]
    fn janela_de_paginas_fica_em_volta_da_atual() {
        let items: Vec<i32> = (1..=100).collect();
        let page = paginate(&items, 10, 5);
        assert_eq!(page.visible_pages, vec![3, 4, 5, 6, 7]);

        let page = paginate(&items, 10, 1);
        assert_eq!(page.visible_pages, vec![1, 2, 3, 4, 5]);

        let page = paginate(&items, 10, 10);
        assert_eq!(page.visible_pages, vec![6, 7, 8, 9, 10]);
    }

    // ---
    // Ordem curada e filtro
    // ---

    #[test]
    fn categorias_seguem_a_ordem_curada_com_desconhecidas_no_fim() {
        let business_id = Uuid::new_v4();
        let sobremesas = category_fixture(business_id, "Sobremesas", 0);
        let entradas = category_fixture(business_id, "Entradas", 5);
        let especiais = category_fixture(business_id, "Especiais da Casa", 1);

        let sorted = sort_categories(vec![sobremesas, entradas, especiais]);
        let names: Vec<&str> = sorted.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Entradas", "Sobremesas", "Especiais da Casa"]);
    }

    #[test]
    fn filtrar_por_categoria_retorna_so_os_produtos_dela() {
        // Cenário: 2 categorias ativas e 5 produtos, 3 na categoria X.
        let business_id = Uuid::new_v4();
        let x = category_fixture(business_id, "Pizzas", 0);
        let y = category_fixture(business_id, "Bebidas", 1);

        let products = vec![
            view(product_fixture(business_id, x.id, "Margherita", "10.00"), "Pizzas"),
            view(product_fixture(business_id, x.id, "Calabresa", "12.00"), "Pizzas"),
            view(product_fixture(business_id, x.id, "Portuguesa", "14.00"), "Pizzas"),
            view(product_fixture(business_id, y.id, "Suco de Laranja", "6.00"), "Bebidas"),
            view(product_fixture(business_id, y.id, "Refrigerante", "5.00"), "Bebidas"),
        ];

        let filtered = filter_products(&products, Some(x.id));
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|p| p.product.category_id == x.id));
    }

    #[test]
    fn filtro_todas_ordena_por_nome_de_produto() {
        let business_id = Uuid::new_v4();
        let category = category_fixture(business_id, "Pizzas", 0);

        let products = vec![
            view(product_fixture(business_id, category.id, "Portuguesa", "14.00"), "Pizzas"),
            view(product_fixture(business_id, category.id, "Calabresa", "12.00"), "Pizzas"),
            view(product_fixture(business_id, category.id, "Margherita", "10.00"), "Pizzas"),
        ];

        let all = filter_products(&products, None);
        let names: Vec<&str> = all.iter().map(|p| p.product.name.as_str()).collect();
        assert_eq!(names, vec!["Calabresa", "Margherita", "Portuguesa"]);
    }

    // ---
    // Carga e enriquecimento
    // ---

    #[tokio::test]
    async fn load_menu_enriquece_produtos_com_o_nome_da_categoria() {
        let business_id = Uuid::new_v4();
        let pizzas = category_fixture(business_id, "Pizzas", 0);
        let product = product_fixture(business_id, pizzas.id, "Margherita", "10.00");

        let repo = FakeCatalogRepository::new(vec![pizzas], vec![product]);
        let service = CatalogService::new(Arc::new(repo));

        let (categories, products) = service.load_menu(business_id).await.expect("carrega");
        assert_eq!(categories.len(), 1);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category_name, "Pizzas");
    }
}
