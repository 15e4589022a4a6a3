pub mod confetti;
pub mod reward_popup;

pub use reward_popup::RewardPopup;
