pub mod formspree_client;
