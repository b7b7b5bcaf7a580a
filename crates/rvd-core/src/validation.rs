use crate::error::ValidationError;
use crate::types::io::{CreateReviewInput, UpdateReviewInput};

pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 250;
pub const TITLE_MAX_LEN: usize = 120;
pub const CONTENT_MIN_LEN: usize = 3;
pub const CONTENT_MAX_LEN: usize = 10_000;
pub const MARK_MIN: i64 = 1;
pub const MARK_MAX: i64 = 10;

pub fn validate_user_id(id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::new("user id should be positive"));
    }
    Ok(())
}

pub fn validate_event_id(id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::new("event id should be positive"));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::new("username shouldn't be blank"));
    }
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::new(format!(
            "username should be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::new(format!(
            "title shouldn't be more than {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::new("content shouldn't be blank"));
    }
    let len = content.chars().count();
    if !(CONTENT_MIN_LEN..=CONTENT_MAX_LEN).contains(&len) {
        return Err(ValidationError::new(format!(
            "content should be {CONTENT_MIN_LEN}-{CONTENT_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_mark(mark: i64) -> Result<(), ValidationError> {
    if !(MARK_MIN..=MARK_MAX).contains(&mark) {
        return Err(ValidationError::new(format!(
            "mark should be between {MARK_MIN} and {MARK_MAX}"
        )));
    }
    Ok(())
}

pub fn validate_create(input: &CreateReviewInput) -> Result<(), ValidationError> {
    validate_user_id(input.author_id)?;
    validate_event_id(input.event_id)?;
    validate_username(&input.username)?;
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    validate_content(&input.content)?;
    validate_mark(input.mark)?;
    Ok(())
}

pub fn validate_update(input: &UpdateReviewInput) -> Result<(), ValidationError> {
    if let Some(username) = &input.username {
        validate_username(username)?;
    }
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(content) = &input.content {
        validate_content(content)?;
    }
    if let Some(mark) = input.mark {
        validate_mark(mark)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateReviewInput {
        CreateReviewInput {
            author_id: 1,
            username: "alice".to_string(),
            event_id: 7,
            title: None,
            content: "worth attending".to_string(),
            mark: 8,
        }
    }

    #[test]
    fn accepts_valid_create() {
        assert!(validate_create(&create_input()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_mark() {
        let mut input = create_input();
        input.mark = 0;
        assert!(validate_create(&input).is_err());
        input.mark = 11;
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn rejects_short_content() {
        let mut input = create_input();
        input.content = "no".to_string();
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn rejects_blank_username() {
        let mut input = create_input();
        input.username = "   ".to_string();
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn update_with_all_fields_absent_is_valid() {
        let input = UpdateReviewInput {
            username: None,
            title: None,
            content: None,
            mark: None,
        };
        assert!(validate_update(&input).is_ok());
    }
}
