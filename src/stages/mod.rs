// SYNOID Growl SFX - Pipeline Stages
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod finalize;
pub mod fx;
pub mod peak;
pub mod synth;

pub use finalize::{finalize, remove_temporaries};
pub use fx::{apply_fx, monster_chain, FilterChain};
pub use peak::{measure_peak, parse_max_volume};
pub use synth::synthesize;
