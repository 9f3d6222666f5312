pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notifier;
pub mod payment;
pub mod reservation;
pub mod tenant_resolver;

#[cfg(test)]
pub(crate) mod testing;

use validator::{ValidationError, ValidationErrors};

use crate::common::error::AppError;

// ---
// Resultado da fase de envio (persistir, depois avisar)
// ---
// O estado parcial "gravado mas sem aviso" tem nome próprio: é visível
// para o usuário e testável, não um acidente de try/catch. Gravação que
// falhou nem chega aqui (vira erro e o aviso nunca dispara).
#[derive(Debug)]
pub enum SubmissionOutcome<T> {
    /// Gravou e avisou a equipe.
    Completed(T),
    /// Gravou, mas o canal de avisos falhou. O registro existe.
    RecordedNotNotified(T),
}

// Nome e telefone são o portão de Editing -> AwaitingConfirmation: sem
// eles o envio é rejeitado no lugar, antes de qualquer persistência.
pub(crate) fn validate_contact(name: &str, phone: &str) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();

    if name.trim().is_empty() {
        let mut error = ValidationError::new("length");
        error.message = Some("O nome é obrigatório.".into());
        errors.add("customerName".into(), error);
    }
    if phone.trim().is_empty() {
        let mut error = ValidationError::new("length");
        error.message = Some("O telefone é obrigatório.".into());
        errors.add("customerPhone".into(), error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}
