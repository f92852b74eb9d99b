use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{DeviceName, Username};
use crate::domain::user::Credentials;
use crate::forms::FormError;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data submitted from the login screen.
pub struct LoginForm {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Name the issued token is registered under.
    #[serde(default)]
    pub device_name: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            username: Username::new(form.username).map_err(|_| FormError::InvalidUsername)?,
            password: form.password,
            device_name: DeviceName::new(form.device_name)
                .map_err(|_| FormError::InvalidDeviceName)?,
        })
    }
}
