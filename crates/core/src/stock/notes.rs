//! Movement log notes.

use chrono::NaiveDate;

/// `Compra de {supplier} em {date}`.
#[must_use]
pub fn purchase(supplier: &str, date: NaiveDate) -> String {
    format!("Compra de {supplier} em {date}")
}

/// `Venda para {customer} em {date}`.
#[must_use]
pub fn sale(customer: &str, date: NaiveDate) -> String {
    format!("Venda para {customer} em {date}")
}

/// `Condicional {direction} - {origin}`.
#[must_use]
pub fn conditional(direction: &str, origin: &str) -> String {
    format!("Condicional {direction} - {origin}")
}

/// `Devolução de condicional - {origin}`.
#[must_use]
pub fn conditional_return(origin: &str) -> String {
    format!("Devolução de condicional - {origin}")
}

/// `Estorno de compra #{number} (excluída)`.
#[must_use]
pub fn purchase_reversal(number: i64) -> String {
    format!("Estorno de compra #{number} (excluída)")
}

/// `Estorno de venda #{number} (excluída)`.
#[must_use]
pub fn sale_reversal(number: i64) -> String {
    format!("Estorno de venda #{number} (excluída)")
}

/// `Cancelamento de condicional - {origin}`.
#[must_use]
pub fn conditional_cancel(origin: &str) -> String {
    format!("Cancelamento de condicional - {origin}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(purchase("ACME", date), "Compra de ACME em 2024-03-09");
        assert_eq!(sale("Ana", date), "Venda para Ana em 2024-03-09");
        assert_eq!(conditional("recebido", "Loja X"), "Condicional recebido - Loja X");
        assert_eq!(conditional_return("Loja X"), "Devolução de condicional - Loja X");
        assert_eq!(purchase_reversal(12), "Estorno de compra #12 (excluída)");
        assert_eq!(sale_reversal(7), "Estorno de venda #7 (excluída)");
    }
}
