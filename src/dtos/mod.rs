pub mod applicationdtos;
pub mod roomdtos;
pub mod userdtos;
