// src/middleware/auth.rs

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::AppState;

// Claims do token emitido pelo painel do dono (o login mora lá, não aqui).
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

// ---
// OwnerContext: o dono autenticado, se houver
// ---
// A vitrine é pública: token ausente ou inválido nunca derruba a
// requisição, apenas deixa o resolvedor de tenant sem a regra do dono.
#[derive(Debug, Clone)]
pub struct OwnerContext(pub Option<Uuid>);

impl FromRequestParts<AppState> for OwnerContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let owner_id = token.and_then(|token| {
            match decode::<Claims>(
                token,
                &DecodingKey::from_secret(state.jwt_secret.as_ref()),
                &Validation::default(),
            ) {
                Ok(data) => Some(data.claims.sub),
                Err(e) => {
                    // Token ruim em rota pública: ignora e segue anônimo.
                    tracing::debug!("Token de dono ignorado: {}", e);
                    None
                }
            }
        });

        Ok(OwnerContext(owner_id))
    }
}
