//! Reductor del ledger de pagos
//!
//! Este módulo calcula los agregados de pago de un alquiler a partir de
//! sus transacciones firmadas (positivo = cobro, negativo = devolución).
//! Es una suma pura e independiente del orden: el mismo conjunto de
//! transacciones produce siempre el mismo resumen.

use rust_decimal::Decimal;

use crate::models::rental::PaymentStatus;
use crate::utils::errors::{validation_error, AppResult};

/// Resumen reconciliado del ledger de un alquiler.
///
/// Invariante: `pending_amount = max(0, amount - total_paid)` y
/// `balance = total_paid - amount`. Pendiente y sobrepago son mutuamente
/// excluyentes: nunca pueden ser ambos positivos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSummary {
    pub total_paid: Decimal,
    pub pending_amount: Decimal,
    pub balance: Decimal,
}

impl LedgerSummary {
    /// Queda monto por cobrar.
    pub fn is_pending(&self) -> bool {
        self.pending_amount > Decimal::ZERO
    }

    /// El cliente pagó de más; el excedente se le debe devolver.
    pub fn is_overpaid(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// No queda nada por cobrar. Cubre tanto el pago exacto como el
    /// sobrepago; para distinguirlos usar is_settled / is_overpaid.
    pub fn is_paid(&self) -> bool {
        !self.is_pending()
    }

    /// Pagado exacto: ni pendiente ni sobrepago.
    pub fn is_settled(&self) -> bool {
        !self.is_pending() && !self.is_overpaid()
    }

    /// Clasificación para la columna payment_status.
    pub fn payment_status(&self) -> PaymentStatus {
        if !self.is_pending() {
            PaymentStatus::Paid
        } else if self.total_paid > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }
}

/// Reducir la lista completa de transacciones firmadas de un alquiler.
pub fn summarize(amount: Decimal, transactions: &[Decimal]) -> LedgerSummary {
    let total_paid: Decimal = transactions.iter().copied().sum();
    from_totals(amount, total_paid)
}

/// Construir el resumen desde los totales ya agregados (columnas del rental).
pub fn from_totals(amount: Decimal, total_paid: Decimal) -> LedgerSummary {
    let pending = (amount - total_paid).max(Decimal::ZERO);
    LedgerSummary {
        total_paid,
        pending_amount: pending,
        balance: total_paid - amount,
    }
}

/// Validar un cobro contra el estado actual del ledger.
/// El monto ingresado debe ser positivo y no exceder el pendiente.
pub fn validate_charge(summary: &LedgerSummary, entered: Decimal) -> AppResult<()> {
    if entered <= Decimal::ZERO {
        return Err(validation_error("amount", "Ingrese un monto válido"));
    }
    if entered > summary.pending_amount {
        return Err(validation_error("amount", "El monto excede el pendiente"));
    }
    Ok(())
}

/// Validar una devolución contra el estado actual del ledger.
/// El monto ingresado debe ser positivo y no exceder el sobrepago.
pub fn validate_refund(summary: &LedgerSummary, entered: Decimal) -> AppResult<()> {
    if entered <= Decimal::ZERO {
        return Err(validation_error("amount", "Ingrese un monto válido"));
    }
    if entered > summary.balance {
        return Err(validation_error("amount", "El monto excede el sobrepago"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn empty_ledger_is_fully_pending() {
        let summary = summarize(bs(450), &[]);
        assert_eq!(summary.total_paid, bs(0));
        assert_eq!(summary.pending_amount, bs(450));
        assert_eq!(summary.balance, bs(-450));
        assert!(summary.is_pending());
        assert!(!summary.is_paid());
        assert_eq!(summary.payment_status(), PaymentStatus::Pending);
    }

    #[test]
    fn partial_payments_accumulate() {
        let summary = summarize(bs(450), &[bs(150), bs(100)]);
        assert_eq!(summary.total_paid, bs(250));
        assert_eq!(summary.pending_amount, bs(200));
        assert!(summary.is_pending());
        assert!(!summary.is_overpaid());
        assert_eq!(summary.payment_status(), PaymentStatus::Partial);
    }

    #[test]
    fn exact_settlement() {
        let summary = summarize(bs(450), &[bs(150), bs(100), bs(200)]);
        assert_eq!(summary.pending_amount, bs(0));
        assert_eq!(summary.balance, bs(0));
        assert!(summary.is_paid());
        assert!(summary.is_settled());
        assert!(!summary.is_overpaid());
        assert_eq!(summary.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn overpaid_is_paid_but_not_settled() {
        let summary = summarize(bs(100), &[bs(150)]);
        assert_eq!(summary.pending_amount, bs(0));
        assert_eq!(summary.balance, bs(50));
        assert!(summary.is_paid());
        assert!(summary.is_overpaid());
        assert!(!summary.is_settled());
        assert_eq!(summary.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn refund_reopens_pending() {
        // El ledger es una suma pura, no un trinquete: una devolución
        // puede volver a dejar el contrato pendiente.
        let summary = summarize(bs(450), &[bs(150), bs(100), bs(200), bs(-50)]);
        assert_eq!(summary.total_paid, bs(400));
        assert_eq!(summary.pending_amount, bs(50));
        assert!(summary.is_pending());
        assert!(!summary.is_overpaid());
    }

    #[test]
    fn pending_and_overpaid_are_mutually_exclusive() {
        for paid in [-100i64, 0, 200, 450, 500, 700] {
            let summary = from_totals(bs(450), bs(paid));
            assert!(
                !(summary.is_pending() && summary.is_overpaid()),
                "pendiente y sobrepago simultáneos con total_paid={}",
                paid
            );
            if summary.is_pending() {
                assert!(summary.balance <= Decimal::ZERO);
            }
            if summary.is_overpaid() {
                assert_eq!(summary.pending_amount, Decimal::ZERO);
            }
        }
    }

    #[test]
    fn charge_ceiling_is_enforced() {
        let summary = from_totals(bs(450), bs(250));
        assert_eq!(summary.pending_amount, bs(200));
        // Un boliviano por encima del pendiente se rechaza
        assert!(validate_charge(&summary, bs(201)).is_err());
        // El pendiente exacto se acepta y salda el contrato
        assert!(validate_charge(&summary, bs(200)).is_ok());
        let settled = summarize(bs(450), &[bs(250), bs(200)]);
        assert_eq!(settled.pending_amount, bs(0));
        assert!(settled.is_settled());
    }

    #[test]
    fn refund_ceiling_is_enforced() {
        let summary = from_totals(bs(100), bs(150));
        assert_eq!(summary.balance, bs(50));
        assert!(validate_refund(&summary, bs(51)).is_err());
        assert!(validate_refund(&summary, bs(50)).is_ok());
        let returned = summarize(bs(100), &[bs(150), bs(-50)]);
        assert!(returned.is_settled());
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let summary = from_totals(bs(450), bs(0));
        assert!(validate_charge(&summary, bs(0)).is_err());
        assert!(validate_charge(&summary, bs(-10)).is_err());
        let overpaid = from_totals(bs(100), bs(150));
        assert!(validate_refund(&overpaid, bs(0)).is_err());
        assert!(validate_refund(&overpaid, bs(-10)).is_err());
    }

    #[test]
    fn refund_rejected_without_overpay() {
        let summary = from_totals(bs(450), bs(250));
        assert!(summary.balance < Decimal::ZERO);
        assert!(validate_refund(&summary, bs(10)).is_err());
    }
}
