mod history;
mod price_alert;
mod token;
