pub mod constants;
pub mod handoff;
pub mod reveal_session;
pub mod shared_scratch_game;
pub mod shared_wheel_game;
