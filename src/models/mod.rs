pub mod applicationmodel;
pub mod roommodel;
pub mod usermodel;
