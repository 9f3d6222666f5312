// src/services/payment.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    models::business::{Business, PaymentMethodKind},
};

// ---
// O que o checkout enxerga de um método disponível
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDescriptor {
    pub code: PaymentMethodKind,
    pub display_name: String,
    pub transfer_key: Option<String>,
    pub qr_image_url: Option<String>,
}

// ---
// PaymentMethodValidator: da configuração crua para a union fechada
// ---
// Um método só é oferecido se está na configuração do estabelecimento E
// habilitado. O mapeamento tipo -> código é total por construção: a
// configuração desserializa direto para `PaymentMethodKind`, então não
// existe tipo "solto" para cair num buraco de string.
pub struct PaymentMethodValidator;

impl PaymentMethodValidator {
    /// Lista vazia é um resultado válido (e distinto de "carregando"):
    /// a tela mostra "nenhum método configurado" em vez de quebrar.
    pub fn available_methods(business: &Business) -> Vec<PaymentMethodDescriptor> {
        let mut seen: Vec<PaymentMethodKind> = Vec::new();
        business
            .payment_methods
            .0
            .iter()
            .filter(|config| config.enabled)
            .filter(|config| {
                // Configuração duplicada do mesmo tipo: vale a primeira.
                if seen.contains(&config.kind) {
                    false
                } else {
                    seen.push(config.kind);
                    true
                }
            })
            .map(|config| PaymentMethodDescriptor {
                code: config.kind,
                display_name: config
                    .display_name
                    .clone()
                    .unwrap_or_else(|| config.kind.default_display_name().to_string()),
                transfer_key: config.transfer_key.clone(),
                qr_image_url: config.qr_image_url.clone(),
            })
            .collect()
    }

    /// Seleção padrão quando o cliente ainda não escolheu: o primeiro
    /// método disponível. O resto da escolha é todo do usuário.
    pub fn default_method(methods: &[PaymentMethodDescriptor]) -> Option<PaymentMethodKind> {
        methods.first().map(|method| method.code)
    }

    /// O formulário só pode enviar um método presente na lista disponível.
    pub fn ensure_available(
        methods: &[PaymentMethodDescriptor],
        chosen: PaymentMethodKind,
    ) -> Result<(), AppError> {
        if methods.is_empty() {
            return Err(AppError::NoPaymentMethods);
        }
        if !methods.iter().any(|method| method.code == chosen) {
            return Err(AppError::PaymentMethodNotAvailable);
        }
        Ok(())
    }
}
