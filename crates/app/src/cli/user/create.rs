use clap::Args;
use greengrocer_app::{
    auth::{JwtConfig, JwtService, Password, PgAuthService},
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email address to sign in with
    #[arg(long)]
    email: String,

    /// Password for the new account
    #[arg(long, env = "GREENGROCER_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant catalog and order management
    #[arg(long)]
    admin: bool,

    /// JWT signing secret, only used to build the auth service
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let jwt = JwtConfig::new(&args.jwt_secret, 60)
        .map_err(|error| format!("invalid JWT configuration: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool), JwtService::new(&jwt));

    let user = service
        .create_user(&args.email, &Password::new(args.password), args.admin)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("admin: {}", user.is_admin);

    Ok(())
}
