use clap::{Args, Subcommand};

use boxoffice::{
    forms::{Form, LoginForm, ProfileForm, RegistrationForm, format_cpf},
    users::{Role, User},
};
use boxoffice_app::context::AppContext;

use super::{invalid, read_failed, storage_failed, write_failed};

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Full name
    #[arg(long)]
    name: String,

    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    /// Account password (at least 6 characters)
    #[arg(long, env = "BOXOFFICE_PASSWORD", hide_env_values = true)]
    password: String,

    /// CPF, with or without punctuation
    #[arg(long)]
    cpf: String,

    /// Account role (user, organizer)
    #[arg(long, default_value_t = Role::User)]
    role: Role,
}

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    username: String,

    #[arg(long, env = "BOXOFFICE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    /// Show your profile
    Show,
    /// Edit your profile; omitted fields keep their value
    Update(UpdateProfileArgs),
    /// Delete your account and log out
    Delete,
}

#[derive(Debug, Args)]
struct UpdateProfileArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    cpf: Option<String>,
}

pub(crate) async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<(), String> {
    let form = RegistrationForm {
        name: args.name,
        username: args.username,
        email: args.email,
        password: args.password,
        cpf: args.cpf,
        role: args.role,
    };

    let new_user = form.submit().map_err(|errors| invalid(&errors))?;

    let user = ctx
        .users
        .register(new_user)
        .await
        .map_err(|error| write_failed("create account", &error))?;

    println!("account created for {}", user.username);
    println!("run `boxoffice login` to start buying tickets");

    Ok(())
}

pub(crate) async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let form = LoginForm {
        username: args.username,
        password: args.password,
    };

    let credentials = form.submit().map_err(|errors| invalid(&errors))?;

    let session = ctx
        .users
        .login(credentials)
        .await
        .map_err(|error| write_failed("log in", &error))?;

    ctx.sessions
        .save(&session)
        .map_err(|error| storage_failed("store session", &error))?;

    println!("logged in as {} ({})", session.user.name, session.user.role);

    Ok(())
}

pub(crate) fn logout(ctx: &AppContext) -> Result<(), String> {
    ctx.sessions
        .clear()
        .map_err(|error| storage_failed("log out", &error))?;

    println!("logged out");

    Ok(())
}

pub(crate) async fn run(ctx: &AppContext, command: ProfileCommand) -> Result<(), String> {
    match command.command {
        ProfileSubcommand::Show => show(ctx).await,
        ProfileSubcommand::Update(args) => update(ctx, args).await,
        ProfileSubcommand::Delete => delete(ctx).await,
    }
}

async fn show(ctx: &AppContext) -> Result<(), String> {
    let session = ctx.auth.require_session().map_err(|error| error.to_string())?;

    let user = ctx
        .users
        .get_user(&session.access_token, session.user_id())
        .await
        .map_err(|error| read_failed("profile", &error))?;

    print_user(&user);

    Ok(())
}

async fn update(ctx: &AppContext, args: UpdateProfileArgs) -> Result<(), String> {
    let session = ctx.auth.require_session().map_err(|error| error.to_string())?;
    let mut form = ProfileForm::from(&session.user);

    if let Some(name) = args.name {
        form.name = name;
    }

    if let Some(username) = args.username {
        form.username = username;
    }

    if let Some(email) = args.email {
        form.email = email;
    }

    if let Some(cpf) = args.cpf {
        form.cpf = cpf;
    }

    let update = form.submit().map_err(|errors| invalid(&errors))?;

    let user = ctx
        .users
        .update_me(&session.access_token, update)
        .await
        .map_err(|error| write_failed("update profile", &error))?;

    print_user(&user);

    ctx.sessions
        .save(&session.with_user(user))
        .map_err(|error| storage_failed("store session", &error))?;

    Ok(())
}

async fn delete(ctx: &AppContext) -> Result<(), String> {
    let session = ctx.auth.require_session().map_err(|error| error.to_string())?;

    ctx.users
        .delete_me(&session.access_token)
        .await
        .map_err(|error| write_failed("delete account", &error))?;

    ctx.sessions
        .clear()
        .map_err(|error| storage_failed("log out", &error))?;

    println!("account deleted");

    Ok(())
}

fn print_user(user: &User) {
    println!("name: {}", user.name);
    println!("username: {}", user.username);
    println!("email: {}", user.email);
    println!("cpf: {}", format_cpf(&user.cpf));
    println!("role: {}", user.role);
}
