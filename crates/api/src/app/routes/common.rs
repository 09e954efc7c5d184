use stockpilot_auth::{CommandAuthorization, Permission};

/// Pairs a request body with the permission it requires, so the handler can
/// run the authorization guard before touching the service layer.
pub struct CmdAuth<C> {
    pub inner: C,
    pub required: Permission,
}

impl<C> CommandAuthorization for CmdAuth<C> {
    fn required_permission(&self) -> Permission {
        self.required.clone()
    }
}
