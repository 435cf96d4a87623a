pub mod expense;
pub mod stored_plan;
pub mod travel;
