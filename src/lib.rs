//! Meal-planning backend for nutritionists: users, patients, a food
//! reference table, meal plans and meals, with nutrition computed on read.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod foods;
pub mod meal_plans;
pub mod meals;
pub mod nutrition;
pub mod patients;
pub mod response;
pub mod state;
pub mod users;
pub mod validation;

#[cfg(test)]
mod test_support;
