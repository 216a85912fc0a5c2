use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Fila aplanada del join rental + client + vehicle + driver con las
/// cifras ya reconciliadas. Es la entrada del exportador de planillas;
/// el formato del documento queda fuera del núcleo.
#[derive(Debug, Serialize)]
pub struct RentalExportRow {
    pub id: Uuid,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub vehicle_name: String,
    pub driver_name: String,
    pub category: String,
    pub event_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub base_rate: Decimal,
    pub amount: Decimal,
    pub total_paid: Decimal,
    pub pending_amount: Decimal,
    pub balance: Decimal,
    pub payment_status: String,
    pub status: String,
    pub pickup_location: String,
    pub destination_location: String,
    pub created_at: String,
}

/// KPIs del dashboard
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DashboardSummaryResponse {
    pub total_rentals: usize,
    pub reserved: usize,
    pub completed: usize,
    pub pending_payments: usize,
    pub paid_payments: usize,
    pub total_revenue: Decimal,
    pub total_collected: Decimal,
    pub total_pending_amount: Decimal,
    pub this_month_rentals: usize,
    pub this_month_revenue: Decimal,
    pub today_rentals: usize,
    pub vehicles_in_use: usize,
}
