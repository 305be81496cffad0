//! Suggestion lifecycle transitions.
//!
//! Each function takes the caller's collection by value and returns the
//! collection after the transition. Nothing here touches storage.

use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::{HangoutSuggestion, ParticipantResponse, SuggestionStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("suggestion {id} not found")]
    SuggestionNotFound { id: Uuid },

    #[error("user {user_id} is not a participant of suggestion {id}")]
    NotParticipant { id: Uuid, user_id: String },

    #[error("suggestion {id} is already {status:?}")]
    AlreadyResolved { id: Uuid, status: SuggestionStatus },
}

fn position(collection: &[HangoutSuggestion], id: Uuid) -> Result<usize, LifecycleError> {
    collection
        .iter()
        .position(|s| s.id == id)
        .ok_or(LifecycleError::SuggestionNotFound { id })
}

fn ensure_participant(s: &HangoutSuggestion, user_id: &str) -> Result<(), LifecycleError> {
    if s.is_participant(user_id) {
        Ok(())
    } else {
        Err(LifecycleError::NotParticipant {
            id: s.id,
            user_id: user_id.to_string(),
        })
    }
}

/// Record `user_id`'s answer.
///
/// A decline removes the suggestion outright. An accept is stored and the
/// group status resolves once every participant has a response.
pub fn record_response(
    mut collection: Vec<HangoutSuggestion>,
    id: Uuid,
    user_id: &str,
    response: ParticipantResponse,
) -> Result<Vec<HangoutSuggestion>, LifecycleError> {
    let idx = position(&collection, id)?;
    ensure_participant(&collection[idx], user_id)?;
    if collection[idx].status != SuggestionStatus::Pending {
        return Err(LifecycleError::AlreadyResolved {
            id,
            status: collection[idx].status,
        });
    }

    match response {
        ParticipantResponse::Declined => {
            collection.remove(idx);
        }
        ParticipantResponse::Accepted => {
            let target = &mut collection[idx];
            target.responses.insert(user_id.to_string(), response);
            if target.all_responded() {
                // Only accepts are ever stored, so the declined arm is unreachable today.
                target.status = if target.all_accepted() {
                    SuggestionStatus::Accepted
                } else {
                    SuggestionStatus::Declined
                };
            }
        }
    }
    Ok(collection)
}

/// Withdraw `user_id`'s response and reopen the suggestion.
pub fn unaccept(
    mut collection: Vec<HangoutSuggestion>,
    id: Uuid,
    user_id: &str,
) -> Result<Vec<HangoutSuggestion>, LifecycleError> {
    let idx = position(&collection, id)?;
    let target = &mut collection[idx];
    ensure_participant(target, user_id)?;

    target.responses.remove(user_id);
    target.status = SuggestionStatus::Pending;
    Ok(collection)
}

/// Explicit delete by a participant or the creator.
pub fn remove(
    mut collection: Vec<HangoutSuggestion>,
    id: Uuid,
    user_id: &str,
) -> Result<Vec<HangoutSuggestion>, LifecycleError> {
    let idx = position(&collection, id)?;
    if collection[idx].created_by != user_id {
        ensure_participant(&collection[idx], user_id)?;
    }
    collection.remove(idx);
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn suggestion(participants: &[&str]) -> HangoutSuggestion {
        HangoutSuggestion {
            id: Uuid::new_v4(),
            title: "Board Game Night".into(),
            description: "Play board games together".into(),
            location: "Home or Cafe".into(),
            suggested_time: Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap(),
            duration: 180,
            activity: "Board Game Night".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            status: SuggestionStatus::Pending,
            responses: BTreeMap::new(),
            created_by: participants[0].to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn accepts_resolve_only_when_everyone_answered() {
        let s = suggestion(&["u1", "u2"]);
        let id = s.id;

        let after_u1 = record_response(vec![s], id, "u1", ParticipantResponse::Accepted).unwrap();
        assert_eq!(after_u1[0].status, SuggestionStatus::Pending);
        assert_eq!(
            after_u1[0].responses,
            BTreeMap::from([("u1".to_string(), ParticipantResponse::Accepted)])
        );

        let after_u2 = record_response(after_u1, id, "u2", ParticipantResponse::Accepted).unwrap();
        assert_eq!(after_u2[0].status, SuggestionStatus::Accepted);
        assert_eq!(after_u2[0].responses.len(), 2);
        assert!(after_u2[0].all_accepted());
    }

    #[test]
    fn decline_removes_only_the_target() {
        let keep = suggestion(&["u1", "u2"]);
        let drop = suggestion(&["u1", "u2"]);
        let (keep_id, drop_id) = (keep.id, drop.id);

        let out = record_response(
            vec![keep.clone(), drop],
            drop_id,
            "u1",
            ParticipantResponse::Declined,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, keep_id);
        assert_eq!(out[0], keep);
    }

    #[test]
    fn status_stays_pending_while_responses_are_missing() {
        let s = suggestion(&["u1", "u2", "u3"]);
        let id = s.id;
        let mut coll = vec![s];
        for user in ["u3", "u1"] {
            coll = record_response(coll, id, user, ParticipantResponse::Accepted).unwrap();
            assert!(!coll[0].all_responded());
            assert_eq!(coll[0].status, SuggestionStatus::Pending);
        }
    }

    #[test]
    fn unaccept_reopens_and_drops_only_own_response() {
        let s = suggestion(&["u1", "u2"]);
        let id = s.id;
        let coll = record_response(vec![s], id, "u1", ParticipantResponse::Accepted).unwrap();
        let coll = record_response(coll, id, "u2", ParticipantResponse::Accepted).unwrap();
        assert_eq!(coll[0].status, SuggestionStatus::Accepted);

        let coll = unaccept(coll, id, "u2").unwrap();
        assert_eq!(coll[0].status, SuggestionStatus::Pending);
        assert_eq!(
            coll[0].responses,
            BTreeMap::from([("u1".to_string(), ParticipantResponse::Accepted)])
        );

        // Withdrawing without a prior response still resets the status.
        let coll = unaccept(coll, id, "u2").unwrap();
        assert_eq!(coll[0].status, SuggestionStatus::Pending);
        assert_eq!(coll[0].responses.len(), 1);
    }

    #[test]
    fn resolved_suggestion_rejects_new_responses() {
        let s = suggestion(&["u1"]);
        let id = s.id;
        let coll = record_response(vec![s], id, "u1", ParticipantResponse::Accepted).unwrap();
        assert_eq!(coll[0].status, SuggestionStatus::Accepted);

        let err = record_response(coll.clone(), id, "u1", ParticipantResponse::Declined)
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::AlreadyResolved {
                id,
                status: SuggestionStatus::Accepted
            }
        );

        let reopened = unaccept(coll, id, "u1").unwrap();
        assert!(record_response(reopened, id, "u1", ParticipantResponse::Declined)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn membership_and_existence_are_checked() {
        let s = suggestion(&["u1", "u2"]);
        let id = s.id;
        let missing = Uuid::new_v4();

        assert_eq!(
            record_response(vec![s.clone()], missing, "u1", ParticipantResponse::Accepted)
                .unwrap_err(),
            LifecycleError::SuggestionNotFound { id: missing }
        );
        assert!(matches!(
            record_response(vec![s.clone()], id, "u9", ParticipantResponse::Accepted),
            Err(LifecycleError::NotParticipant { .. })
        ));
        assert!(matches!(
            unaccept(vec![s.clone()], id, "u9"),
            Err(LifecycleError::NotParticipant { .. })
        ));
        assert!(matches!(
            remove(vec![s], id, "u9"),
            Err(LifecycleError::NotParticipant { .. })
        ));
    }

    #[test]
    fn creator_may_remove_without_participating() {
        let mut s = suggestion(&["u2"]);
        s.created_by = "u1".into();
        let id = s.id;
        assert!(remove(vec![s], id, "u1").unwrap().is_empty());
    }
}
