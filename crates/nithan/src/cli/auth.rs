//! Sign-in command handlers.

use super::Context;
use nithan_auth::require_login_available;
use nithan_error::NithanResult;
use tracing::instrument;

/// Signs in with `credential` and remembers the token.
#[instrument(skip_all)]
pub fn handle_login(ctx: &Context, credential: &str) -> NithanResult<()> {
    require_login_available(ctx.caps())?;
    let mut session = ctx.auth_session()?;
    let user = session.login(credential)?;
    println!("Signed in as {}", user);
    Ok(())
}

/// Signs out.
#[instrument(skip_all)]
pub fn handle_logout(ctx: &Context) -> NithanResult<()> {
    let mut session = ctx.auth_session()?;
    session.logout()?;
    println!("Signed out");
    Ok(())
}

/// Prints the signed-in user.
pub fn handle_whoami(ctx: &Context) -> NithanResult<()> {
    let mut session = ctx.auth_session()?;
    match session.restore() {
        Some(user) => println!("{}", user),
        None => println!("Not signed in"),
    }
    Ok(())
}
