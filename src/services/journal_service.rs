use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{Journal, NewJournal},
    services::{
        cross_write::{self, BackRef, CrossWrite, Primary},
        ownership::{self, RecordKind},
        store::{Filter, Update},
    },
    AppState,
};

pub async fn create_journal(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    req: NewJournal,
) -> Result<Journal, ApiError> {
    let user = ownership::user_from_path(state, raw_user_id, caller).await?;

    let journal = Journal::new(user.id, req);

    cross_write::apply(
        &state.db,
        state.db.journals.as_ref(),
        CrossWrite {
            owner: user.id,
            primary: Primary::Insert {
                id: journal.id,
                record: &journal,
            },
            back_ref: BackRef::Journal,
            companion: None,
        },
    )
    .await?;

    Ok(journal)
}

pub async fn list_journals(state: &AppState, caller: &AuthUser, raw_user_id: &str) -> Result<Vec<Journal>, ApiError> {
    let user = ownership::user_from_path(state, raw_user_id, caller).await?;
    Ok(state.db.journals.find(&Filter::Owner(user.id.to_hex())).await?)
}

pub async fn get_journal(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_journal_id: &str,
) -> Result<Journal, ApiError> {
    let (user, journal_id) = ownership::user_and_record_id(state, raw_user_id, raw_journal_id, caller).await?;

    ownership::resolve_record(state, state.db.journals.as_ref(), RecordKind::Journal, user.id, journal_id).await
}

/// Wholesale replacement, including the date.
pub async fn update_journal(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_journal_id: &str,
    req: NewJournal,
) -> Result<Journal, ApiError> {
    let (user, journal_id) = ownership::user_and_record_id(state, raw_user_id, raw_journal_id, caller).await?;

    let mut journal =
        ownership::resolve_record(state, state.db.journals.as_ref(), RecordKind::Journal, user.id, journal_id).await?;

    journal.replace_with(req);
    journal.owner = user.id.to_hex();

    state
        .db
        .journals
        .update_one(&Filter::Id(journal_id), &Update::set_record(&journal)?)
        .await?;

    Ok(journal)
}

pub async fn delete_journal(
    state: &AppState,
    caller: &AuthUser,
    raw_user_id: &str,
    raw_journal_id: &str,
) -> Result<(), ApiError> {
    let (user, journal_id) = ownership::user_and_record_id(state, raw_user_id, raw_journal_id, caller).await?;

    ownership::resolve_record(state, state.db.journals.as_ref(), RecordKind::Journal, user.id, journal_id).await?;

    cross_write::apply::<Journal>(
        &state.db,
        state.db.journals.as_ref(),
        CrossWrite {
            owner: user.id,
            primary: Primary::Delete { id: journal_id },
            back_ref: BackRef::Journal,
            companion: None,
        },
    )
    .await?;

    Ok(())
}
