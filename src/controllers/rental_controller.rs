//! Controller de alquileres
//!
//! Orquesta las validaciones del formulario, el detector de conflictos,
//! la calculadora de tarifas y el reductor del ledger antes de tocar el
//! repositorio. Ningún cálculo vive en los handlers.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::rental_dto::{
    AvailabilityQuery, AvailabilityResponse, CreateRentalRequest, RentalResponse,
    UpdateRentalRequest,
};
use crate::models::rental::RentalStatus;
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::rental_repository::{NewRental, RentalRepository, RentalUpdate};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::conflict_service::{self, BookingWindow};
use crate::services::{ledger_service, rate_service};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

const DEFAULT_LOCATION: &str = "A confirmar";
const DEFAULT_CATEGORY: &str = "General";

pub struct RentalController {
    rentals: RentalRepository,
    clients: ClientRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
}

impl RentalController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rentals: RentalRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<RentalResponse>, AppError> {
        let rentals = self.rentals.find_all().await?;
        Ok(rentals.into_iter().map(RentalResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RentalResponse, AppError> {
        let rental = self
            .rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alquiler no encontrado".to_string()))?;

        Ok(rental.into())
    }

    pub async fn create(
        &self,
        request: CreateRentalRequest,
    ) -> Result<ApiResponse<RentalResponse>, AppError> {
        request.validate()?;

        // Selecciones requeridas: cliente y vehículo deben existir
        self.clients
            .find_by_id(request.client_id)
            .await?
            .ok_or_else(|| validation_error("client_id", "Seleccione un cliente válido"))?;
        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| validation_error("vehicle_id", "Seleccione un vehículo válido"))?;
        if let Some(driver_id) = request.driver_id {
            self.drivers
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| validation_error("driver_id", "Seleccione un conductor válido"))?;
        }

        let start_time = validation::validate_time(&request.start_time)
            .map_err(|_| validation_error("start_time", "Formato de hora inválido (HH:MM)"))?;
        let end_time = validation::validate_time(&request.end_time)
            .map_err(|_| validation_error("end_time", "Formato de hora inválido (HH:MM)"))?;
        validation::validate_time_window(start_time, end_time).map_err(|_| {
            validation_error("end_time", "La hora de fin debe ser posterior a la de inicio")
        })?;
        validation::validate_non_negative(request.base_rate)
            .map_err(|_| validation_error("base_rate", "La tarifa base no puede ser negativa"))?;

        let status = match request.status.as_deref() {
            Some(value) => RentalStatus::parse(value)
                .ok_or_else(|| validation_error("status", "Estado de contrato inválido"))?,
            None => RentalStatus::Reserved,
        };

        // Invariante duro: la superposición se re-valida al guardar
        // aunque el formulario ya haya deshabilitado las opciones
        self.check_conflicts(
            request.date,
            start_time,
            end_time,
            request.vehicle_id,
            request.driver_id,
            None,
        )
        .await?;

        // Monto manual si llegó; calculado con la tarifa base si no
        let amount = match request.amount {
            Some(value) => {
                validation::validate_non_negative(value)
                    .map_err(|_| validation_error("amount", "El monto no puede ser negativo"))?;
                value
            }
            None => rate_service::calculate_amount(start_time, end_time, request.base_rate),
        };

        let summary = ledger_service::from_totals(amount, Decimal::ZERO);

        let rental = self
            .rentals
            .create(NewRental {
                client_id: request.client_id,
                vehicle_id: request.vehicle_id,
                driver_id: request.driver_id,
                category: non_empty_or(request.category, DEFAULT_CATEGORY),
                event_name: request.event_name.unwrap_or_default(),
                date: request.date,
                start_time,
                end_time,
                base_rate: request.base_rate,
                amount,
                pending_amount: summary.pending_amount,
                payment_status: summary.payment_status().as_str().to_string(),
                status: status.as_str().to_string(),
                pickup_location: non_empty_or(request.pickup_location, DEFAULT_LOCATION),
                destination_location: non_empty_or(request.destination_location, DEFAULT_LOCATION),
                pickup_coords: request.pickup_coords,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            rental.into(),
            "Contrato creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRentalRequest,
    ) -> Result<ApiResponse<RentalResponse>, AppError> {
        request.validate()?;

        let current = self
            .rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alquiler no encontrado".to_string()))?;

        let client_id = request.client_id.unwrap_or(current.client_id);
        if client_id != current.client_id {
            self.clients
                .find_by_id(client_id)
                .await?
                .ok_or_else(|| validation_error("client_id", "Seleccione un cliente válido"))?;
        }

        let vehicle_id = request.vehicle_id.unwrap_or(current.vehicle_id);
        if vehicle_id != current.vehicle_id {
            self.vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| validation_error("vehicle_id", "Seleccione un vehículo válido"))?;
        }

        let driver_id = request.driver_id.or(current.driver_id);
        if driver_id != current.driver_id {
            if let Some(new_driver) = driver_id {
                self.drivers
                    .find_by_id(new_driver)
                    .await?
                    .ok_or_else(|| validation_error("driver_id", "Seleccione un conductor válido"))?;
            }
        }

        let date = request.date.unwrap_or(current.date);
        let start_time = match request.start_time.as_deref() {
            Some(value) => validation::validate_time(value)
                .map_err(|_| validation_error("start_time", "Formato de hora inválido (HH:MM)"))?,
            None => current.start_time,
        };
        let end_time = match request.end_time.as_deref() {
            Some(value) => validation::validate_time(value)
                .map_err(|_| validation_error("end_time", "Formato de hora inválido (HH:MM)"))?,
            None => current.end_time,
        };
        validation::validate_time_window(start_time, end_time).map_err(|_| {
            validation_error("end_time", "La hora de fin debe ser posterior a la de inicio")
        })?;

        let base_rate = request.base_rate.unwrap_or(current.base_rate);
        validation::validate_non_negative(base_rate)
            .map_err(|_| validation_error("base_rate", "La tarifa base no puede ser negativa"))?;

        let status = match request.status.as_deref() {
            Some(value) => RentalStatus::parse(value)
                .ok_or_else(|| validation_error("status", "Estado de contrato inválido"))?,
            None => RentalStatus::parse(&current.status)
                .ok_or_else(|| AppError::Internal(format!("Estado persistido inválido: {}", current.status)))?,
        };
        // completed es terminal: no se vuelve a reserved
        if current.is_completed() && status == RentalStatus::Reserved {
            return Err(validation_error(
                "status",
                "Un contrato completado no puede volver a reservado",
            ));
        }

        self.check_conflicts(date, start_time, end_time, vehicle_id, driver_id, Some(id))
            .await?;

        // Recomputación reactiva: cualquier cambio de horario o tarifa
        // pisa el monto mostrado, salvo que llegue un monto manual
        let rate_inputs_changed = request.start_time.is_some()
            || request.end_time.is_some()
            || request.base_rate.is_some();
        let amount = match request.amount {
            Some(value) => {
                validation::validate_non_negative(value)
                    .map_err(|_| validation_error("amount", "El monto no puede ser negativo"))?;
                value
            }
            None if rate_inputs_changed => {
                rate_service::calculate_amount(start_time, end_time, base_rate)
            }
            None => current.amount,
        };

        let summary = ledger_service::from_totals(amount, current.total_paid);

        let rental = self
            .rentals
            .update(
                id,
                RentalUpdate {
                    client_id,
                    vehicle_id,
                    driver_id,
                    category: request.category.unwrap_or(current.category),
                    event_name: request.event_name.unwrap_or(current.event_name),
                    date,
                    start_time,
                    end_time,
                    base_rate,
                    amount,
                    pending_amount: summary.pending_amount,
                    payment_status: summary.payment_status().as_str().to_string(),
                    status: status.as_str().to_string(),
                    pickup_location: request.pickup_location.unwrap_or(current.pickup_location),
                    destination_location: request
                        .destination_location
                        .unwrap_or(current.destination_location),
                    pickup_coords: request
                        .pickup_coords
                        .or(current.pickup_coords.map(|coords| coords.0)),
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            rental.into(),
            "Contrato actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alquiler no encontrado".to_string()))?;

        self.rentals.delete(id).await
    }

    /// Ids de vehículos y conductores ocupados en la ventana consultada.
    /// El formulario deshabilita estas opciones; el guardado vuelve a
    /// pasar por check_conflicts.
    pub async fn availability(
        &self,
        query: AvailabilityQuery,
    ) -> Result<AvailabilityResponse, AppError> {
        let start_time = validation::validate_time(&query.start_time)
            .map_err(|_| validation_error("start_time", "Formato de hora inválido (HH:MM)"))?;
        let end_time = validation::validate_time(&query.end_time)
            .map_err(|_| validation_error("end_time", "Formato de hora inválido (HH:MM)"))?;
        validation::validate_time_window(start_time, end_time).map_err(|_| {
            validation_error("end_time", "La hora de fin debe ser posterior a la de inicio")
        })?;

        let existing = self.rentals.find_active_on_date(query.date, query.exclude).await?;
        let window = BookingWindow::new(query.date, start_time, end_time);
        let report = conflict_service::detect(&window, &existing, query.exclude);

        let mut busy_vehicle_ids: Vec<Uuid> = report.vehicles.into_iter().collect();
        busy_vehicle_ids.sort();
        let mut busy_driver_ids: Vec<Uuid> = report.drivers.into_iter().collect();
        busy_driver_ids.sort();

        Ok(AvailabilityResponse {
            busy_vehicle_ids,
            busy_driver_ids,
            conflicting_rental_ids: report.rentals,
        })
    }

    async fn check_conflicts(
        &self,
        date: chrono::NaiveDate,
        start_time: chrono::NaiveTime,
        end_time: chrono::NaiveTime,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<(), AppError> {
        let existing = self.rentals.find_active_on_date(date, exclude).await?;
        let window = BookingWindow::new(date, start_time, end_time);
        let report = conflict_service::detect(&window, &existing, exclude);

        if report.vehicle_busy(vehicle_id) {
            return Err(AppError::Conflict(
                "El vehículo ya está reservado en un horario superpuesto".to_string(),
            ));
        }
        if let Some(driver_id) = driver_id {
            if report.driver_busy(driver_id) {
                return Err(AppError::Conflict(
                    "El conductor ya está asignado en un horario superpuesto".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}
