// src/middleware/session.rs

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use uuid::Uuid;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
pub const SESSION_ID_HEADER: &str = "x-session-id";

// Um id de sessão não precisa ser grande; acima disso é lixo de cliente.
const MAX_SESSION_ID_LEN: usize = 64;

// ---
// SessionContext: a sessão anônima do visitante
// ---
// O id é um token opaco gerado uma vez e guardado pelo navegador. Ele só
// escopa o carrinho; não carrega identidade nem vínculo com estabelecimento.
// Construído uma vez por requisição pelo middleware e passado adiante,
// em vez de lido de um global a cada uso.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: String,
    // O cliente não mandou id (primeira visita ou navegação privada que
    // não consegue guardar). A sessão segue normalmente, só não dura.
    pub generated: bool,
}

/// Sintetiza um id novo: timestamp + sufixo aleatório. Unicidade aqui é
/// escopo de carrinho, não segurança.
pub fn new_session_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple())
}

// Decide o contexto a partir do cabeçalho (ou da falta dele). Separado do
// middleware para ser testável sem montar um servidor.
fn context_from_header(provided: Option<&str>) -> SessionContext {
    let provided = provided
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= MAX_SESSION_ID_LEN);

    match provided {
        Some(id) => SessionContext { id: id.to_string(), generated: false },
        None => SessionContext { id: new_session_id(), generated: true },
    }
}

// O middleware em si: lê (ou cria) o id, injeta o contexto na requisição e
// devolve o id no cabeçalho da resposta para o cliente persistir.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let context = context_from_header(
        request
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    );

    if context.generated {
        // Condição degradada (primeira visita ou navegação privada que não
        // guarda o id): a sessão segue, só não sobrevive ao reload.
        tracing::warn!("Requisição sem X-Session-Id; sessão efêmera {} criada", context.id);
    }

    let session_id = context.id.clone();
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&session_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_ID_HEADER), value);
    }

    response
}

// Extrator para obter a sessão diretamente nos handlers
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!("session_middleware ausente na rota que usa SessionContext").into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_gerado_tem_timestamp_e_sufixo() {
        let id = new_session_id();
        let (timestamp, suffix) = id.split_once('-').expect("formato timestamp-sufixo");
        assert!(timestamp.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 32);
    }

    #[test]
    fn ids_gerados_nao_se_repetem() {
        // Mesmo dentro do mesmo milissegundo o sufixo aleatório difere.
        let a = new_session_id();
        let b = new_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn cabecalho_presente_preserva_o_id_do_cliente() {
        let context = context_from_header(Some("  1700000000000-abc  "));
        assert_eq!(context.id, "1700000000000-abc");
        assert!(!context.generated);
    }

    #[test]
    fn sem_cabecalho_a_sessao_ganha_um_id_utilizavel() {
        // Cliente que não consegue guardar o id (navegação privada) chega
        // sempre sem cabeçalho: a sessão segue com um id efêmero.
        let context = context_from_header(None);
        assert!(!context.id.is_empty());
        assert!(context.generated);
    }

    #[test]
    fn cabecalho_vazio_ou_gigante_e_tratado_como_ausente() {
        assert!(context_from_header(Some("   ")).generated);

        let oversized = "x".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(context_from_header(Some(&oversized)).generated);
    }
}
