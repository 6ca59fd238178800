use chrono::NaiveTime;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    day::DayOfWeek,
    facility::{
        event::{CreateFacility, OpenHoursSpec, UpdateFacility},
        Facility,
    },
    id::FacilityId,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

use super::lenient_hour;

#[derive(Debug, Deserialize)]
pub struct OpenHoursRequest {
    pub day: DayOfWeek,
    #[serde(deserialize_with = "lenient_hour::deserialize")]
    pub start_hour: NaiveTime,
    #[serde(deserialize_with = "lenient_hour::deserialize")]
    pub end_hour: NaiveTime,
}

impl OpenHoursRequest {
    // start < end は呼び出し側で窓を構築する際に検証する
    fn into_spec(self) -> AppResult<OpenHoursSpec> {
        if self.start_hour >= self.end_hour {
            return Err(AppError::UnprocessableEntity(format!(
                "Open hours on {} must start before they end.",
                self.day
            )));
        }
        Ok(OpenHoursSpec::new(self.day, self.start_hour, self.end_hour))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFacilityRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: String,
    #[garde(custom(non_negative_price))]
    pub price_hourly: f64,
    #[garde(skip)]
    pub id_facility_type: i64,
    #[garde(skip)]
    pub id_address: i64,
    #[garde(skip)]
    pub id_company: i64,
    #[garde(skip)]
    pub open_hours: Vec<OpenHoursRequest>,
}

impl TryFrom<CreateFacilityRequest> for CreateFacility {
    type Error = AppError;

    fn try_from(value: CreateFacilityRequest) -> Result<Self, Self::Error> {
        let CreateFacilityRequest {
            name,
            description,
            price_hourly,
            id_facility_type,
            id_address,
            id_company,
            open_hours,
        } = value;
        let open_hours = open_hours
            .into_iter()
            .map(OpenHoursRequest::into_spec)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(CreateFacility::new(
            name,
            description,
            price_hourly,
            id_facility_type,
            id_address,
            id_company,
            open_hours,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFacilityRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(custom(non_negative_price)))]
    pub price_hourly: Option<f64>,
    #[garde(skip)]
    pub id_facility_type: Option<i64>,
    #[garde(skip)]
    pub id_address: Option<i64>,
    #[garde(skip)]
    pub id_company: Option<i64>,
    /// 指定された場合は営業時間の組を丸ごと入れ替える
    #[garde(skip)]
    pub open_hours: Option<Vec<OpenHoursRequest>>,
}

#[derive(new)]
pub struct UpdateFacilityRequestWithId {
    facility_id: FacilityId,
    request: UpdateFacilityRequest,
}

impl TryFrom<UpdateFacilityRequestWithId> for UpdateFacility {
    type Error = AppError;

    fn try_from(value: UpdateFacilityRequestWithId) -> Result<Self, Self::Error> {
        let UpdateFacilityRequestWithId {
            facility_id,
            request,
        } = value;
        let open_hours = request
            .open_hours
            .map(|hours| {
                hours
                    .into_iter()
                    .map(OpenHoursRequest::into_spec)
                    .collect::<AppResult<Vec<_>>>()
            })
            .transpose()?;
        Ok(UpdateFacility {
            facility_id,
            name: request.name,
            description: request.description,
            price_hourly: request.price_hourly,
            id_facility_type: request.id_facility_type,
            id_address: request.id_address,
            id_company: request.id_company,
            open_hours,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FacilityResponse {
    pub id_facility: FacilityId,
    pub name: String,
    pub description: String,
    pub price_hourly: f64,
    pub id_facility_type: i64,
    pub id_address: i64,
    pub id_company: i64,
}

impl From<Facility> for FacilityResponse {
    fn from(value: Facility) -> Self {
        let Facility {
            facility_id,
            name,
            description,
            price_hourly,
            id_facility_type,
            id_address,
            id_company,
        } = value;
        Self {
            id_facility: facility_id,
            name,
            description,
            price_hourly,
            id_facility_type,
            id_address,
            id_company,
        }
    }
}

fn non_negative_price(value: &f64, _context: &()) -> garde::Result {
    if *value < 0.0 {
        return Err(garde::Error::new("price_hourly must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_fails_validation() {
        let req: CreateFacilityRequest = serde_json::from_value(serde_json::json!({
            "name": "Court A",
            "description": "",
            "price_hourly": -1.0,
            "id_facility_type": 1,
            "id_address": 1,
            "id_company": 1,
            "open_hours": [],
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn unordered_open_hours_are_rejected_on_conversion() {
        let req: CreateFacilityRequest = serde_json::from_value(serde_json::json!({
            "name": "Court A",
            "description": "",
            "price_hourly": 20.0,
            "id_facility_type": 1,
            "id_address": 1,
            "id_company": 1,
            "open_hours": [
                {"day": "Monday", "start_hour": "18:00", "end_hour": "10:00"},
            ],
        }))
        .unwrap();
        assert!(matches!(
            CreateFacility::try_from(req),
            Err(AppError::UnprocessableEntity(_))
        ));
    }
}
