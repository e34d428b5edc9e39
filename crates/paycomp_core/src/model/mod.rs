mod params;
mod policy;
mod results;
mod role;

pub use params::ParameterSet;
pub use policy::{
    CommissionScheme, ConversionAdjustment, ConversionPolicy, OldSchemeVariant, PayMode,
    ShortfallDiscount,
};
pub use results::{
    BreakEven, BreakEvenStatus, Comparison, ComparisonRow, ConversionMetrics, RoleCostLine,
    SalaryBreakdown, SocialInsurance, StoreReport, TierBreakdown,
};
pub use role::{Role, RoleTable};
