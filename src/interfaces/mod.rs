pub mod return_url;
