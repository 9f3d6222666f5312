// src/services/notifier.rs

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

// Espera máxima pelo gateway. Um canal pendurado vira falha de aviso em
// vez de deixar o envio do pedido preso em "enviando".
const SEND_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Falha HTTP ao enviar a mensagem: {0}")]
    Http(#[from] reqwest::Error),

    #[error("O gateway recusou a mensagem: {status} - {message}")]
    Gateway { status: u16, message: String },

    #[error("Estabelecimento sem número de WhatsApp configurado")]
    MissingPhone,
}

// ---
// Contrato do canal de avisos à equipe
// ---
// Só "mandar texto para um número e dizer se deu certo". Confirmação de
// entrega fica fora; quem falhou aqui já gravou o pedido (ver checkout).
#[async_trait]
pub trait StaffNotifier: Send + Sync {
    async fn send_text(&self, phone: &str, body: &str) -> Result<(), NotifyError>;
}

// ---
// Implementação real: gateway HTTP de WhatsApp
// ---
#[derive(Clone)]
pub struct WhatsAppNotifier {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

impl WhatsAppNotifier {
    pub fn new(api_url: String, api_token: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, api_url, api_token })
    }
}

#[async_trait]
impl StaffNotifier for WhatsAppNotifier {
    async fn send_text(&self, phone: &str, body: &str) -> Result<(), NotifyError> {
        let url = format!("{}/messages", self.api_url.trim_end_matches('/'));

        let payload = serde_json::json!({
            "to": phone,
            "type": "text",
            "text": { "body": body },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
