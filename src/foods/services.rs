use crate::error::{ApiError, ApiResult};
use crate::validation::FieldErrors;

use super::dto::{CreateFoodRequest, UpdateFoodRequest};

/// Trim and check a new food; all nutrient values must be finite and >= 0.
pub fn validate_create(mut req: CreateFoodRequest) -> ApiResult<CreateFoodRequest> {
    req.food_name = req.food_name.trim().to_string();

    let mut errs = FieldErrors::new();
    errs.non_empty("food_name", &req.food_name);
    errs.non_negative("kcal_per_serving", req.kcal_per_serving);
    errs.non_negative("carbs_per_serving", req.carbs_per_serving);
    errs.non_negative("protein_per_serving", req.protein_per_serving);
    errs.non_negative("fat_per_serving", req.fat_per_serving);
    errs.finish("Invalid food data!")?;
    Ok(req)
}

pub fn validate_update(mut req: UpdateFoodRequest) -> ApiResult<UpdateFoodRequest> {
    if req.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    if let Some(name) = req.food_name.as_mut() {
        *name = name.trim().to_string();
    }

    let mut errs = FieldErrors::new();
    if let Some(name) = &req.food_name {
        errs.non_empty("food_name", name);
    }
    for (field, value) in [
        ("kcal_per_serving", req.kcal_per_serving),
        ("carbs_per_serving", req.carbs_per_serving),
        ("protein_per_serving", req.protein_per_serving),
        ("fat_per_serving", req.fat_per_serving),
    ] {
        if let Some(v) = value {
            errs.non_negative(field, v);
        }
    }
    errs.finish("Invalid food data!")?;
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> CreateFoodRequest {
        CreateFoodRequest {
            food_name: "  White rice ".into(),
            kcal_per_serving: 130.0,
            carbs_per_serving: 28.0,
            protein_per_serving: 2.7,
            fat_per_serving: 0.3,
        }
    }

    #[test]
    fn create_trims_name() {
        let ok = validate_create(rice()).unwrap();
        assert_eq!(ok.food_name, "White rice");
    }

    #[test]
    fn create_rejects_negative_values_and_blank_name() {
        let mut bad = rice();
        bad.food_name = "   ".into();
        bad.fat_per_serving = -0.1;
        match validate_create(bad) {
            Err(ApiError::Validation { details, .. }) => {
                let details = details.unwrap();
                assert!(details.get("food_name").is_some());
                assert!(details.get("fat_per_serving").is_some());
                assert!(details.get("kcal_per_serving").is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_update_is_bad_request() {
        assert!(matches!(
            validate_update(UpdateFoodRequest::default()),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn update_checks_only_present_fields() {
        let ok = validate_update(UpdateFoodRequest {
            kcal_per_serving: Some(0.0),
            ..Default::default()
        });
        assert!(ok.is_ok());

        let bad = validate_update(UpdateFoodRequest {
            food_name: Some(" ".into()),
            protein_per_serving: Some(-2.0),
            ..Default::default()
        });
        assert!(matches!(bad, Err(ApiError::Validation { .. })));
    }

    #[test]
    fn unknown_update_fields_are_rejected() {
        let res: Result<UpdateFoodRequest, _> =
            serde_json::from_str(r#"{"food_name":"Oats","food_id":7}"#);
        assert!(res.is_err());
    }
}
