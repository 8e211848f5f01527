//! Two-feature ordinary least squares

use super::PriceModel;
use crate::error::PredictError;
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Number of features the model is fitted on: square footage and bedrooms
pub const FEATURE_COUNT: usize = 2;

/// Fitted linear model: `intercept + coefficients . [sqft, bedrooms]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

impl LinearModel {
    /// Create a model from known parameters
    #[must_use]
    #[inline]
    pub const fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Fit price against (square footage, bedrooms) with an intercept
    ///
    /// Rank-deficient inputs (a single row, a constant column, collinear
    /// columns) get the minimum-norm coefficients, so the intercept absorbs
    /// whatever the features cannot explain.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no rows, or `features` does not have exactly two columns
    /// - `targets` does not have one value per row
    /// - The fitted parameters are not finite
    pub fn fit(
        features: ArrayView2<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> Result<Self, PredictError> {
        if features.ncols() != FEATURE_COUNT {
            return Err(PredictError::model(format!(
                "Expected {FEATURE_COUNT} feature columns, got {}",
                features.ncols()
            )));
        }
        if features.nrows() != targets.len() {
            return Err(PredictError::model(format!(
                "Feature rows ({}) and targets ({}) differ in length",
                features.nrows(),
                targets.len()
            )));
        }

        let (Some(feature_means), Some(target_mean)) =
            (features.mean_axis(Axis(0)), targets.mean())
        else {
            return Err(PredictError::model("Cannot fit a model without samples"));
        };

        let centered = &features - &feature_means;
        let centered_targets = &targets - target_mean;

        let coefficients = solve_min_norm(centered.view(), centered_targets.view());
        let intercept = target_mean
            - (feature_means[0] * coefficients[0] + feature_means[1] * coefficients[1]);

        let model = Self::new(coefficients, intercept);
        if !model.is_finite() {
            return Err(PredictError::model(format!(
                "Fitted parameters are not finite: {model:?}"
            )));
        }
        Ok(model)
    }

    /// Whether every parameter is a finite number
    #[must_use]
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }
}

impl PriceModel for LinearModel {
    #[inline]
    fn predict(&self, square_footage: f64, bedrooms: f64) -> f64 {
        self.intercept + self.coefficients[0] * square_footage + self.coefficients[1] * bedrooms
    }
}

/// Minimum-norm least squares solution of `design * w = targets`
///
/// Factors the two columns as `Q * R` (Gram-Schmidt, larger column first,
/// reorthogonalized once) and reads the singular values off the 2x2 `R`.
/// A singular value at or below `largest * eps * max(rows, 2)` counts as zero,
/// leaving the rank-one solution.
#[allow(
    clippy::cast_precision_loss,
    reason = "Row counts only scale the rank tolerance"
)]
fn solve_min_norm(
    design: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
) -> [f64; FEATURE_COUNT] {
    let column_norm = |index: usize| design.column(index).dot(&design.column(index)).sqrt();
    let (lead, trail) = if column_norm(0) >= column_norm(1) {
        (0, 1)
    } else {
        (1, 0)
    };

    let lead_norm = column_norm(lead);
    if lead_norm.is_nan() || lead_norm <= 0.0 {
        return [0.0; FEATURE_COUNT];
    }
    let lead_axis = &design.column(lead) / lead_norm;

    let mut residual = design.column(trail).to_owned();
    let mut projection = lead_axis.dot(&residual);
    residual.scaled_add(-projection, &lead_axis);
    let correction = lead_axis.dot(&residual);
    projection += correction;
    residual.scaled_add(-correction, &lead_axis);
    let residual_norm = residual.dot(&residual).sqrt();

    let (largest, smallest) = singular_values(lead_norm, projection, residual_norm);
    let tolerance = largest * f64::EPSILON * design.nrows().max(FEATURE_COUNT) as f64;
    let lead_target = lead_axis.dot(&targets);

    let (lead_weight, trail_weight) = if smallest > tolerance {
        let trail_target = residual.dot(&targets) / residual_norm;
        let trail_weight = trail_target / residual_norm;
        (
            (lead_target - projection * trail_weight) / lead_norm,
            trail_weight,
        )
    } else {
        // Rank one: the design is lead_axis * [lead_norm, projection]
        let scale = lead_target / (lead_norm * lead_norm + projection * projection);
        (lead_norm * scale, projection * scale)
    };

    let mut solution = [0.0; FEATURE_COUNT];
    solution[lead] = lead_weight;
    solution[trail] = trail_weight;
    solution
}

/// Singular values `(largest, smallest)` of `[[a, b], [0, c]]` with `a > 0`
fn singular_values(a: f64, b: f64, c: f64) -> (f64, f64) {
    let largest = ((a + c) / 2.0).hypot(b / 2.0) + ((a - c) / 2.0).hypot(b / 2.0);
    // |det| / largest keeps the small value accurate where a subtraction would cancel
    (largest, (a * c).abs() / largest)
}
