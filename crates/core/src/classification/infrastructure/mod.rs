pub mod replay_gender_classifier;
