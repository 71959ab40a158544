pub mod event;

pub struct AccessToken(pub String);
