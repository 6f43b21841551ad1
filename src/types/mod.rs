use rust_decimal::Decimal;

pub type Quantity = Decimal;
pub type Amount = Decimal;
pub type Rate = Decimal;
pub type EmployeeCode = String;

/// Separates the code from the display name in a composite dimension key (`"Y810004,Name"`).
pub const DIMENSION_SEPARATOR: char = ',';

/// Offset between Gregorian and Buddhist Era years.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;
