//! User domain
//!
//! Types and traits for registered users: the user entity, the sign-up and
//! sign-in inputs with their validation rules, and the collaborator traits for
//! storage and credential hashing.

mod entity;
mod hasher;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use hasher::PasswordHasher;
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_name, validate_password, SignInInput, SignUpInput,
    UserValidationError,
};

#[cfg(test)]
pub use hasher::MockPasswordHasher;
#[cfg(test)]
pub use repository::mock::MockUserRepository;
