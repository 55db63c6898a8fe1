// Two tiers: public (no token) and protected (role-gated, see `app::router`).
pub mod extract;
pub mod protected;
pub mod public;
