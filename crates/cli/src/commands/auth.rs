//! Session commands.
//!
//! Failures are reported with the storefront's user-facing copy rather than
//! the provider's detail, which is logged by the session container.

use secrecy::SecretString;

use wishshop_storefront::StoreContext;

use crate::render;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub async fn login(ctx: &mut StoreContext, email: &str, password: SecretString) -> CommandResult {
    let user = ctx
        .session_mut()
        .login(email, &password)
        .await
        .map_err(|e| e.user_message())?;
    render::user(Some(user));
    Ok(())
}

pub async fn register(
    ctx: &mut StoreContext,
    name: &str,
    email: &str,
    password: SecretString,
) -> CommandResult {
    let user = ctx
        .session_mut()
        .register(name, email, &password)
        .await
        .map_err(|e| e.user_message())?;
    render::user(Some(user));
    Ok(())
}

pub fn logout(ctx: &mut StoreContext) {
    ctx.session_mut().logout();
    render::user(None);
}

pub fn whoami(ctx: &StoreContext) {
    render::user(ctx.session().user());
}
