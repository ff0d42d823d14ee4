//! Deterministic profile ordering: standalone accounts first, then staged ones.

use crate::profile::Profile;

/// Profile name suffixes marking an account as one stage of a multi-stage setup
pub const STAGE_SUFFIXES: [&str; 5] = ["poc", "stg", "dev", "int", "prd"];

fn is_stage_profile(profile: &Profile) -> bool {
    STAGE_SUFFIXES
        .iter()
        .any(|stage| profile.profile_name.ends_with(stage))
}

/// Sort profiles by name, with all staged profiles after the standalone ones.
pub fn order_profiles(profiles: Vec<Profile>) -> Vec<Profile> {
    let (mut staged, mut single): (Vec<Profile>, Vec<Profile>) =
        profiles.into_iter().partition(is_stage_profile);

    single.sort_by(|a, b| a.profile_name.cmp(&b.profile_name));
    staged.sort_by(|a, b| a.profile_name.cmp(&b.profile_name));

    single.extend(staged);
    single
}
