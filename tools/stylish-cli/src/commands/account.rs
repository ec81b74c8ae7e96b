//! Member account commands.

use anyhow::Result;
use dialoguer::{Input, Password};
use stylish_auth::{SignInForm, SignUpForm};
use stylish_client::{ProfilePanel, SignMode};
use stylish_commerce::prelude::Profile;
use stylish_observability::ActionTimer;

use super::{AccountArgs, AccountCommand};
use crate::context::Context;

/// Run the account command.
pub async fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    let panel = ctx.profile_panel();

    match args.command {
        Some(AccountCommand::Profile) | None => show_profile(&panel, ctx).await,
        Some(AccountCommand::Signin { email }) => sign_in(&panel, email, ctx).await,
        Some(AccountCommand::Signup { name, email }) => sign_up(&panel, name, email, ctx).await,
        Some(AccountCommand::Logout) => logout(&panel, ctx),
    }
}

async fn show_profile(panel: &ProfilePanel, ctx: &Context) -> Result<()> {
    let timer = ActionTimer::start("profile");
    let result = panel.load().await;
    timer.finish(&result);
    print_profile(&result?, ctx);
    Ok(())
}

async fn sign_in(panel: &ProfilePanel, email: Option<String>, ctx: &Context) -> Result<()> {
    panel.set_mode(SignMode::SignIn);

    let email = prompt_or(email, "Email")?;
    let password = Password::new().with_prompt("Password").interact()?;
    let form = SignInForm::new(email, password);

    let spinner = ctx.output.spinner("Signing in...");
    let timer = ActionTimer::start("sign_in");
    let result = panel.sign_in(&form).await;
    timer.finish(&result);
    spinner.finish_and_clear();
    let profile = result?;

    ctx.output.success(&format!("Signed in as {}", profile.name));
    print_profile(&profile, ctx);
    Ok(())
}

async fn sign_up(
    panel: &ProfilePanel,
    name: Option<String>,
    email: Option<String>,
    ctx: &Context,
) -> Result<()> {
    panel.set_mode(SignMode::SignUp);

    let name = prompt_or(name, "Name")?;
    let email = prompt_or(email, "Email")?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;
    let form = SignUpForm::new(name, email, password);

    let spinner = ctx.output.spinner("Creating account...");
    let timer = ActionTimer::start("sign_up");
    let result = panel.sign_up(&form).await;
    timer.finish(&result);
    spinner.finish_and_clear();
    let profile = result?;

    ctx.output.success(&format!("Welcome, {}", profile.name));
    print_profile(&profile, ctx);
    Ok(())
}

fn logout(panel: &ProfilePanel, ctx: &Context) -> Result<()> {
    panel.logout()?;
    ctx.output.success("Signed out");
    Ok(())
}

fn print_profile(profile: &Profile, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(profile);
        return;
    }

    ctx.output.header("Profile");
    ctx.output.kv("Name", &profile.name);
    ctx.output.kv("Email", &profile.email);
    if let Some(picture) = &profile.picture_url {
        ctx.output.kv("Picture", picture);
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}
