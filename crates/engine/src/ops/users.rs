use crate::{
    EngineError, NewUser, ResultEngine, SEEDED_ADMIN_ID, UpdateOutcome, User, UserId, UserPatch,
};

use super::Engine;

impl Engine {
    /// Creates an account. The role is already a valid [`Role`](crate::Role);
    /// re-prompting on bad role text is up to the caller.
    pub fn new_user(&mut self, fields: NewUser) -> UserId {
        let id = self.users.issue_id();
        self.users.push(User::new(id.clone(), fields));
        tracing::debug!("user {id} created");
        id
    }

    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    pub fn user(&self, user_id: &UserId) -> ResultEngine<&User> {
        self.users.get(user_id)
    }

    pub fn update_user(
        &mut self,
        user_id: &UserId,
        patch: UserPatch,
    ) -> ResultEngine<UpdateOutcome<User>> {
        let user = self.users.get_mut(user_id)?;
        let rejected = user.apply(patch);
        tracing::debug!("user {user_id} updated, {} field(s) rejected", rejected.len());

        Ok(UpdateOutcome {
            record: user.clone(),
            rejected,
        })
    }

    /// Removes the account. The seeded administrator is always refused with
    /// [`EngineError::Forbidden`], whoever asks.
    pub fn delete_user(&mut self, user_id: &UserId) -> ResultEngine<User> {
        if user_id.as_str() == SEEDED_ADMIN_ID {
            tracing::warn!("refused to delete the seeded administrator");
            return Err(EngineError::Forbidden(format!(
                "user {SEEDED_ADMIN_ID} cannot be deleted"
            )));
        }
        let user = self.users.remove(user_id)?;
        tracing::debug!("user {user_id} deleted");
        Ok(user)
    }

    /// Returns the first user whose username and password both match.
    pub fn authenticate(&self, username: &str, password: &str) -> ResultEngine<&User> {
        self.users
            .iter()
            .find(|user| user.username == username && user.password == password)
            .ok_or_else(|| EngineError::Forbidden("invalid username or password".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{DEFAULT_ADMIN_PASSWORD, Role, SEEDED_ADMIN_USERNAME};

    use super::*;

    fn manager() -> NewUser {
        NewUser {
            role: Role::Manager,
            username: String::from("testuser"),
            password: String::from("password123"),
        }
    }

    #[test]
    fn create_user() {
        let mut engine = Engine::default();
        let id = engine.new_user(manager());

        let users = engine.users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, id);
        assert_eq!(users[1].username, "testuser");
        assert_eq!(users[1].role, Role::Manager);
    }

    #[test]
    fn seeded_admin_cannot_be_deleted() {
        let mut engine = Engine::default();
        let admin = UserId::from(SEEDED_ADMIN_ID);

        for _ in 0..2 {
            assert!(matches!(
                engine.delete_user(&admin),
                Err(EngineError::Forbidden(_))
            ));
        }
        assert!(engine.user(&admin).is_ok());
    }

    #[test]
    fn delete_user() {
        let mut engine = Engine::default();
        let id = engine.new_user(manager());

        engine.delete_user(&id).unwrap();
        assert_eq!(engine.users().len(), 1);
        assert!(matches!(
            engine.delete_user(&id),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn update_user_role() {
        let mut engine = Engine::default();
        let id = engine.new_user(manager());

        let outcome = engine
            .update_user(
                &id,
                UserPatch {
                    role: Some(String::from("administrator")),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(outcome.is_complete());
        assert_eq!(engine.user(&id).unwrap().role, Role::Administrator);
    }

    #[test]
    fn authenticate() {
        let mut engine = Engine::default();
        engine.new_user(manager());

        let admin = engine
            .authenticate(SEEDED_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .unwrap();
        assert!(admin.is_seeded_admin());

        let user = engine.authenticate("testuser", "password123").unwrap();
        assert_eq!(user.role, Role::Manager);

        assert!(matches!(
            engine.authenticate("testuser", "wrong"),
            Err(EngineError::Forbidden(_))
        ));
    }
}
