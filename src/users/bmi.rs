/// Body-mass index, weight(kg) / height(m)^2, rounded to one decimal.
/// Returns None unless both height and weight are positive.
pub fn compute(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let meters = height_cm / 100.0;
    let bmi = weight_kg / (meters * meters);
    Some((bmi * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 16.0 {
            BmiCategory::SeverelyUnderweight
        } else if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::Obese
        } else {
            BmiCategory::SeverelyObese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
            BmiCategory::SeverelyObese => "Severely Obese",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_one_decimal() {
        assert_eq!(compute(170.0, 70.0), Some(24.2));
        assert_eq!(compute(150.0, 110.0), Some(48.9));
    }

    #[test]
    fn requires_positive_inputs() {
        assert_eq!(compute(0.0, 70.0), None);
        assert_eq!(compute(170.0, 0.0), None);
        assert_eq!(compute(-170.0, 70.0), None);
    }

    #[test]
    fn categorizes() {
        assert_eq!(BmiCategory::from_bmi(15.9), BmiCategory::SeverelyUnderweight);
        assert_eq!(BmiCategory::from_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(24.2), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(27.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(32.0), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(48.9), BmiCategory::SeverelyObese);
        assert_eq!(BmiCategory::from_bmi(48.9).label(), "Severely Obese");
    }

    #[test]
    fn boundary_values_fall_upward() {
        assert_eq!(BmiCategory::from_bmi(16.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(35.0), BmiCategory::SeverelyObese);
    }
}
