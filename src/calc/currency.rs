use std::fmt::{Display, Formatter};

/// Amount in Indonesian rupiah, displayed rounded with thousands separators.
///
/// # Examples
///
/// ```
/// use grid_loss_roi::calc::currency::Rupiah;
///
/// assert_eq!(Rupiah(10_118_040.4).to_string(), "Rp 10,118,040");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rupiah(pub f64);

impl Display for Rupiah {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.0.is_finite() {
            return write!(f, "Rp {}", self.0);
        }
        let rounded = format!("{:.0}", self.0.abs());
        let sign = if self.0 < 0.0 && rounded != "0" { "-" } else { "" };
        write!(f, "{sign}Rp {}", group_thousands(&rounded))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
