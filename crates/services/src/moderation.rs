//! # ModerationGate
//!
//! Decides what an update request may do, branching on requester role,
//! post ownership, and whether a flag was provided. Owners cannot flag
//! their own posts; plain users may only flag posts they do not own.

use domains::models::{Identity, PostPatch, Role, UpdatedFields};
use domains::{AppError, Result};

/// The sanctioned shape of an update after gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UpdatePlan {
    /// Write exactly these fields.
    Apply(UpdatedFields),
    /// Nothing to write: the patch carried only a flag the owner may not
    /// set. The flag is ignored rather than rejected.
    Skip,
}

/// Validates the patch and plans the permitted update.
pub(crate) fn plan_update(
    requester: &Identity,
    is_owner: bool,
    patch: PostPatch,
) -> Result<UpdatePlan> {
    if let Some(flag) = patch.flag {
        if !(0..=1).contains(&flag) {
            return Err(AppError::Validation(
                "provided flag must be a number (0 or 1)".to_string(),
            ));
        }
    }

    if requester.role != Role::Admin && !is_owner {
        // Flag-only path: a plain user moderating someone else's post.
        let Some(flag) = patch.flag else {
            return Err(AppError::Validation(
                "flag must be provided in body".to_string(),
            ));
        };
        if patch.description.is_some() || patch.title.is_some() || patch.score.is_some() {
            return Err(AppError::Validation(
                "only the flag may be updated on another user's post".to_string(),
            ));
        }
        return Ok(UpdatePlan::Apply(UpdatedFields {
            is_flagged: Some(flag as u8),
            ..UpdatedFields::default()
        }));
    }

    if let Some(score) = patch.score {
        if !(0..=100).contains(&score) {
            return Err(AppError::Validation(
                "provided score must be of type number 0-100".to_string(),
            ));
        }
    }

    // Full-field path. Only admins may set the flag; an owner's flag is
    // silently dropped.
    let flag_dropped = requester.role != Role::Admin && patch.flag.is_some();
    let fields = UpdatedFields {
        description: patch.description,
        title: patch.title,
        score: patch.score.map(|score| score as u8),
        is_flagged: if requester.role == Role::Admin {
            patch.flag.map(|flag| flag as u8)
        } else {
            None
        },
    };

    if fields.is_empty() {
        if flag_dropped {
            return Ok(UpdatePlan::Skip);
        }
        return Err(no_updatable_attributes());
    }
    Ok(UpdatePlan::Apply(fields))
}

fn no_updatable_attributes() -> AppError {
    AppError::Validation(
        "No updatable attributes provided. Must provide description, title, flag, \
         or score in body (flag is not valid if you are the poster)"
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> Identity {
        Identity {
            username: name.to_string(),
            role: Role::User,
        }
    }

    fn admin(name: &str) -> Identity {
        Identity {
            username: name.to_string(),
            role: Role::Admin,
        }
    }

    fn assert_validation(result: Result<UpdatePlan>, needle: &str) {
        match result {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains(needle), "message {msg:?} missing {needle:?}")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_may_set_flag_and_fields_together() {
        let patch = PostPatch {
            title: Some("x".to_string()),
            flag: Some(1),
            ..PostPatch::default()
        };
        let plan = plan_update(&admin("mod"), false, patch).expect("admin update");
        assert_eq!(
            plan,
            UpdatePlan::Apply(UpdatedFields {
                title: Some("x".to_string()),
                is_flagged: Some(1),
                ..UpdatedFields::default()
            })
        );
    }

    #[test]
    fn test_owner_flag_is_dropped_but_fields_apply() {
        let patch = PostPatch {
            flag: Some(1),
            description: Some("new".to_string()),
            ..PostPatch::default()
        };
        let plan = plan_update(&user("alice"), true, patch).expect("owner update");
        match plan {
            UpdatePlan::Apply(fields) => {
                assert_eq!(fields.description.as_deref(), Some("new"));
                assert_eq!(fields.is_flagged, None);
            }
            UpdatePlan::Skip => panic!("expected Apply"),
        }
    }

    #[test]
    fn test_owner_flag_only_is_a_silent_skip() {
        let patch = PostPatch {
            flag: Some(1),
            ..PostPatch::default()
        };
        let plan = plan_update(&user("alice"), true, patch).expect("flag ignored");
        assert_eq!(plan, UpdatePlan::Skip);
    }

    #[test]
    fn test_non_owner_empty_patch_asks_for_the_flag() {
        assert_validation(
            plan_update(&user("bob"), false, PostPatch::default()),
            "flag must be provided",
        );
    }

    #[test]
    fn test_non_owner_without_flag_is_rejected() {
        let patch = PostPatch {
            title: Some("x".to_string()),
            ..PostPatch::default()
        };
        assert_validation(
            plan_update(&user("bob"), false, patch),
            "flag must be provided",
        );
    }

    #[test]
    fn test_non_owner_flag_with_extra_fields_is_rejected() {
        let patch = PostPatch {
            flag: Some(1),
            title: Some("x".to_string()),
            ..PostPatch::default()
        };
        assert_validation(plan_update(&user("bob"), false, patch), "only the flag");
    }

    #[test]
    fn test_non_owner_flag_only_is_applied() {
        let patch = PostPatch {
            flag: Some(1),
            ..PostPatch::default()
        };
        let plan = plan_update(&user("bob"), false, patch).expect("flag update");
        assert_eq!(
            plan,
            UpdatePlan::Apply(UpdatedFields {
                is_flagged: Some(1),
                ..UpdatedFields::default()
            })
        );
    }

    #[test]
    fn test_flag_outside_zero_one_is_rejected_for_everyone() {
        let patch = PostPatch {
            flag: Some(2),
            ..PostPatch::default()
        };
        assert_validation(plan_update(&admin("mod"), false, patch), "0 or 1");
    }

    #[test]
    fn test_score_out_of_range_is_rejected() {
        let patch = PostPatch {
            score: Some(101),
            ..PostPatch::default()
        };
        assert_validation(plan_update(&user("alice"), true, patch), "0-100");
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        assert_validation(
            plan_update(&admin("mod"), true, PostPatch::default()),
            "No updatable attributes",
        );
    }
}
