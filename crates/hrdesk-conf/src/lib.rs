//! Configuration for hrdesk
//!
//! Settings come from environment variables:
//!
//! | Variable         | Required | Default   |
//! |------------------|----------|-----------|
//! | `DATABASE_URL`   | yes      |           |
//! | `SESSION_SECRET` | yes      |           |
//! | `LOG_LEVEL`      | no       | `info`    |
//! | `MAX_BODY_SIZE`  | no       | 2 MiB     |

pub mod env;
pub mod settings;

pub use env::{Env, EnvError};
pub use settings::{
	DEFAULT_LOG_LEVEL, DEFAULT_MAX_BODY_SIZE, Secret, Settings, SettingsError,
};
