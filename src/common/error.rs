use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Todo caminho terminal vira uma mensagem em linguagem simples; nenhuma
// tela fica em branco ou travada sem explicação.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Estabelecimento não encontrado")]
    BusinessNotFound,

    // Estado explícito: o estabelecimento existe, mas o catálogo está vazio.
    #[error("Cardápio indisponível")]
    MenuUnavailable,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Item do carrinho não encontrado")]
    CartLineNotFound,

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Nenhum método de pagamento configurado")]
    NoPaymentMethods,

    #[error("Método de pagamento indisponível")]
    PaymentMethodNotAvailable,

    #[error("Carrinho vazio")]
    EmptyCart,

    // A fase de persistência do checkout falhou; o aviso nunca foi disparado.
    #[error("Não foi possível registrar o pedido")]
    OrderNotRecorded,

    #[error("Não foi possível registrar a reserva")]
    ReservationNotRecorded,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::BusinessNotFound => {
                (StatusCode::NOT_FOUND, "Estabelecimento não encontrado.")
            }
            AppError::MenuUnavailable => (
                StatusCode::NOT_FOUND,
                "O cardápio deste estabelecimento ainda não está disponível.",
            ),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado."),
            AppError::CartLineNotFound => {
                (StatusCode::NOT_FOUND, "Item do carrinho não encontrado.")
            }
            AppError::OrderNotFound => (StatusCode::NOT_FOUND, "Pedido não encontrado."),
            AppError::NoPaymentMethods => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Este estabelecimento não tem métodos de pagamento configurados.",
            ),
            AppError::PaymentMethodNotAvailable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "O método de pagamento escolhido não está disponível.",
            ),
            AppError::EmptyCart => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Seu carrinho está vazio.",
            ),
            AppError::OrderNotRecorded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Não foi possível registrar seu pedido. Tente novamente.",
            ),
            AppError::ReservationNotRecorded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Não foi possível registrar sua reserva. Tente novamente.",
            ),
            // Falha de carga transitória: o cliente pode tentar de novo
            // manualmente; nunca redirecionamos nem trocamos de tenant.
            AppError::DatabaseError(ref e) => {
                tracing::error!("Erro de banco de dados: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Estamos com instabilidade no momento. Tente novamente.",
                )
            }
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
