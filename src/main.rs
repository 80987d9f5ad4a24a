use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use recipe_lab::catalog::POPULAR_DISHES;
use recipe_lab::history::truncate_title;
use recipe_lab::{
    CuisineStyle, DietaryPreference, DishSelection, GeminiConfig, ImageRequest, MealType,
    RecipeRequest, Result, Session,
};

/// Longest history title shown before it is cut
const HISTORY_TITLE_CHARS: usize = 50;

#[derive(Debug, Parser)]
#[command(author, version, about = "Prepare food with your ingredients")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Save each generated recipe into this directory
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a recipe from ingredients or a popular dish
    Text {
        /// Ingredients, comma or newline separated
        #[arg(short, long, default_value = "")]
        ingredients: String,

        /// Dietary preference (repeatable)
        #[arg(short, long = "diet", default_value = "None")]
        diet: Vec<DietaryPreference>,

        /// Cuisine style
        #[arg(short, long, default_value = "Any")]
        cuisine: CuisineStyle,

        /// Meal type
        #[arg(short, long, default_value = "Any")]
        meal: MealType,

        /// Popular dish name, see `recipe-lab dishes`
        #[arg(long, default_value = "None - Custom Recipe")]
        dish: DishSelection,
    },

    /// Create a recipe from a food photo (jpg, jpeg or png)
    Image {
        path: PathBuf,

        /// Any specific details about the dish
        #[arg(long)]
        context: Option<String>,
    },

    /// Read requests line by line from stdin, keeping a recipe history
    Session,

    /// List the popular dishes that can be requested by name
    Dishes,

    /// List dietary preferences, cuisine styles and meal types
    Options,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine, the key may come from the environment
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_validation() => {
            eprintln!("⚠ {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Dishes => {
            for dish in POPULAR_DISHES {
                println!("{}", dish);
            }
            Ok(())
        }
        Command::Options => {
            print_vocabulary("Dietary preferences", DietaryPreference::ALL);
            print_vocabulary("Cuisine styles", CuisineStyle::ALL);
            print_vocabulary("Meal types", MealType::ALL);
            Ok(())
        }
        Command::Text {
            ingredients,
            diet,
            cuisine,
            meal,
            dish,
        } => {
            let session = start_session()?;
            let request = diet
                .into_iter()
                .fold(RecipeRequest::text().ingredients(&ingredients), |b, d| {
                    b.dietary(d)
                })
                .cuisine(cuisine)
                .meal_type(meal)
                .dish(dish)
                .build()?;
            generate_and_show(&session, &request, cli.out.as_deref()).await
        }
        Command::Image { path, context } => {
            let session = start_session()?;
            let request = image_request(&path, context).await?;
            generate_and_show(&session, &request, cli.out.as_deref()).await
        }
        Command::Session => {
            let session = start_session()?;
            run_session(&session, cli.out.as_deref()).await
        }
    }
}

/// Load configuration and create the model client; a missing key is fatal
fn start_session() -> Result<Session> {
    let config = GeminiConfig::load()?;
    debug!("Using model {} at {}", config.model, config.base_url);
    Session::from_config(&config)
}

async fn image_request(path: &Path, context: Option<String>) -> Result<RecipeRequest> {
    let mut image = ImageRequest::from_path(path).await?;
    image.context = context;
    let request = RecipeRequest::Image(image);
    request.validate()?;
    Ok(request)
}

async fn generate_and_show(
    session: &Session,
    request: &RecipeRequest,
    out: Option<&Path>,
) -> Result<()> {
    if let RecipeRequest::Text(text) = request {
        if let Some(dish) = text.dish.name() {
            println!("🍽 Generating recipe for: {}", dish);
        }
        if !text.ingredients.is_empty() {
            println!("Selected ingredients: {}", text.ingredients.joined());
        }
    }

    let recipe = session.generate(request).await?;
    println!("\n{}\n", recipe.text);

    if let Some(dir) = out {
        let path = recipe.save_in(dir).await?;
        println!("📥 Saved recipe to {}", path.display());
    }

    print_history(session);
    Ok(())
}

fn print_history(session: &Session) {
    println!("📜 Recipe History");
    let titles = session.recent_titles();
    if titles.is_empty() {
        println!("No recipes generated yet!");
    }
    for (i, title) in titles.iter().enumerate() {
        println!("{}. {}", i + 1, truncate_title(title, HISTORY_TITLE_CHARS));
    }
}

/// Line commands accepted by `recipe-lab session`
#[derive(Debug, PartialEq)]
enum SessionCommand {
    Quit,
    History,
    Dish(String),
    Image(PathBuf, Option<String>),
    Ingredients(String),
}

fn parse_session_line(line: &str) -> Option<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    Some(match head {
        "quit" | "exit" => SessionCommand::Quit,
        "history" => SessionCommand::History,
        "dish" => SessionCommand::Dish(rest.to_string()),
        "image" => {
            let (path, context) = rest
                .split_once(char::is_whitespace)
                .map(|(path, context)| (path, Some(context.trim().to_string())))
                .unwrap_or((rest, None));
            SessionCommand::Image(PathBuf::from(path), context)
        }
        _ => SessionCommand::Ingredients(line.to_string()),
    })
}

async fn run_session(session: &Session, out: Option<&Path>) -> Result<()> {
    println!("Enter ingredients, `dish <name>`, `image <path> [context]`, `history` or `quit`.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_session_line(&line) else {
            continue;
        };

        let request = match command {
            SessionCommand::Quit => break,
            SessionCommand::History => {
                print_history(session);
                continue;
            }
            SessionCommand::Dish(name) => name
                .parse::<DishSelection>()
                .and_then(|dish| RecipeRequest::text().dish(dish).build()),
            SessionCommand::Image(path, context) => image_request(&path, context).await,
            SessionCommand::Ingredients(text) => RecipeRequest::text()
                .ingredients(&text)
                .dietary(DietaryPreference::None)
                .build(),
        };

        // One failed request must not end the session
        let outcome = match request {
            Ok(request) => generate_and_show(session, &request, out).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_validation() => eprintln!("⚠ {}", e),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    Ok(())
}

fn print_vocabulary<T: std::fmt::Display>(heading: &str, values: &[T]) {
    println!("{}:", heading);
    for value in values {
        println!("  {}", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_text_command() {
        let cli = Cli::try_parse_from([
            "recipe-lab",
            "text",
            "--ingredients",
            "chicken, rice",
            "--diet",
            "Keto",
            "--diet",
            "High-Protein",
            "--cuisine",
            "Hyderabadi",
            "--dish",
            "hyderabadi biryani",
        ])
        .unwrap();

        match cli.command {
            Command::Text {
                diet, cuisine, dish, meal, ..
            } => {
                assert_eq!(diet, vec![DietaryPreference::Keto, DietaryPreference::HighProtein]);
                assert_eq!(cuisine, CuisineStyle::Hyderabadi);
                assert_eq!(meal, MealType::Any);
                assert_eq!(dish, DishSelection::Named("Hyderabadi Biryani"));
            }
            other => panic!("Expected text command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_defaults_to_custom_recipe() {
        let cli = Cli::try_parse_from(["recipe-lab", "text", "-i", "eggs"]).unwrap();
        match cli.command {
            Command::Text { diet, dish, .. } => {
                assert_eq!(diet, vec![DietaryPreference::None]);
                assert_eq!(dish, DishSelection::Custom);
            }
            other => panic!("Expected text command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_dish() {
        assert!(Cli::try_parse_from(["recipe-lab", "text", "--dish", "Moon Cake"]).is_err());
    }

    #[test]
    fn test_parse_session_lines() {
        assert_eq!(parse_session_line("   "), None);
        assert_eq!(parse_session_line("quit"), Some(SessionCommand::Quit));
        assert_eq!(parse_session_line("history"), Some(SessionCommand::History));
        assert_eq!(
            parse_session_line("dish Butter Chicken"),
            Some(SessionCommand::Dish("Butter Chicken".to_string()))
        );
        assert_eq!(
            parse_session_line("image cake.jpg make it extra creamy"),
            Some(SessionCommand::Image(
                PathBuf::from("cake.jpg"),
                Some("make it extra creamy".to_string())
            ))
        );
        assert_eq!(
            parse_session_line("image cake.png"),
            Some(SessionCommand::Image(PathBuf::from("cake.png"), None))
        );
        assert_eq!(
            parse_session_line("tomatoes, garlic"),
            Some(SessionCommand::Ingredients("tomatoes, garlic".to_string()))
        );
    }
}
