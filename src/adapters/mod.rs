// Adapters: the HTTP surface, the mail relay and the browser-side form client.

pub mod http;
pub mod mail_relay;
pub mod site_client;
