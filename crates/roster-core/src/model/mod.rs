pub mod employee;

pub use employee::{new_employee_id, Employee, EmployeePatch, NewEmployee};
