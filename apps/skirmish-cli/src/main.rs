use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use skirmish_cheats::{CheatConfig, CheatSession};
use skirmish_common::{MapPoint, Nation, PlayerId, PlayerState, Resource, ResourceType};
use skirmish_input::parse_key_script;
use skirmish_kernel::{LocalClient, World};
use skirmish_tools::CheatInspector;
use tracing_subscriber::EnvFilter;

/// Player slots addressable by the Ctrl+Shift+F1..F8 chords.
const MAX_PLAYERS: usize = 8;

#[derive(Parser)]
#[command(name = "skirmish-cli", about = "CLI tool for skirmish cheat sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Cheat configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective cheat configuration as YAML
    Config,
    /// Run a scripted cheat session against a reference world
    Play {
        /// Key script, e.g. "winter <F7> <Alt+3> <Ctrl+Shift+F2>"
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Chat lines sent after the key script
        #[arg(long)]
        chat: Vec<String>,
        /// Place a cheat headquarters for player 0 at "x,y"
        #[arg(long, value_parser = parse_point)]
        place: Vec<MapPoint>,
        /// Bury a deposit before the script runs, as "x,y,kind,amount"
        #[arg(long, value_parser = parse_deposit)]
        resource: Vec<(MapPoint, Resource)>,
        /// Number of human players
        #[arg(long, default_value = "1")]
        humans: u8,
        /// Number of AI players
        #[arg(long, default_value = "1")]
        ai: u8,
        /// Map width and height in nodes
        #[arg(long, default_value = "64")]
        size: u16,
        /// Pretend the game is a replay
        #[arg(long)]
        replay: bool,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => CheatConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CheatConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("skirmish-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("cheat phrase: {}", config.tracker.phrase);
            println!("speed steps: {}", config.tracker.speed_steps);
            let commands: Vec<&str> = config
                .tracker
                .chat_commands
                .keys()
                .map(String::as_str)
                .collect();
            println!("chat commands: {}", commands.join(", "));
        }
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Play {
            keys,
            chat,
            place,
            resource,
            humans,
            ai,
            size,
            replay,
            json,
        } => {
            let mut world = reference_world(size, humans, ai)?;
            for (pt, deposit) in resource {
                world.set_resource(pt, deposit);
            }
            let mut client = LocalClient::in_game(PlayerId(0));
            client.set_replay_mode(replay);
            let mut session = CheatSession::new(&config);

            for ke in parse_key_script(&keys)? {
                if let Some(action) = session.on_key(&ke, &mut world, &mut client) {
                    tracing::info!(key = %ke, action = action.name(), "key cheat");
                }
            }
            for line in &chat {
                match session.on_chat(line, &mut world, &mut client) {
                    Some(action) => {
                        tracing::info!(line = line.as_str(), action = action.name(), "chat cheat")
                    }
                    None => tracing::info!(line = line.as_str(), "chat"),
                }
            }
            for pt in place {
                if let Err(e) = session
                    .cheats()
                    .place_cheat_building(&mut world, pt, PlayerId(0))
                {
                    tracing::warn!(%pt, error = %e, "headquarters not placed");
                }
            }

            client.commit_frame_length();
            let summary = CheatInspector::summary(session.cheats(), &world, &client);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{summary}");
            }
        }
    }

    Ok(())
}

/// Humans first, then AI players, each with an HQ on a 4x2 layout.
fn reference_world(size: u16, humans: u8, ai: u8) -> anyhow::Result<World> {
    let total = usize::from(humans) + usize::from(ai);
    if total == 0 || total > MAX_PLAYERS {
        anyhow::bail!("player count must be between 1 and {MAX_PLAYERS}, got {total}");
    }
    if size < 32 {
        anyhow::bail!("map size must be at least 32, got {size}");
    }

    let mut world = World::new(size, size);
    let states = std::iter::repeat(PlayerState::Human)
        .take(usize::from(humans))
        .chain(std::iter::repeat(PlayerState::Ai).take(usize::from(ai)));
    let nations = [
        Nation::Romans,
        Nation::Vikings,
        Nation::Africans,
        Nation::Japanese,
        Nation::Babylonians,
    ];
    let step = size / 4;
    for (i, state) in states.enumerate() {
        let id = world
            .add_player(nations[i % nations.len()], state)
            .context("no free player slot")?;
        let col = (i % 4) as u16;
        let row = (i / 4) as u16;
        let hq = MapPoint::new(col * step + step / 2, row * 2 * step + step / 2);
        world.found_headquarters(id, hq);
    }
    world.drain_events();
    Ok(world)
}

fn parse_point(s: &str) -> Result<MapPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(MapPoint::new(x, y))
}

/// Parses "x,y,kind,amount", e.g. "12,30,gold,5".
fn parse_deposit(s: &str) -> Result<(MapPoint, Resource), String> {
    let mut fields = s.splitn(3, ',');
    let (Some(x), Some(y), Some(rest)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected x,y,kind,amount, got {s:?}"));
    };
    let pt = parse_point(&format!("{x},{y}"))?;
    let (kind, amount) = rest
        .split_once(',')
        .ok_or_else(|| format!("expected x,y,kind,amount, got {s:?}"))?;
    let kind = match kind.trim().to_ascii_lowercase().as_str() {
        "iron" => ResourceType::Iron,
        "gold" => ResourceType::Gold,
        "coal" => ResourceType::Coal,
        "granite" => ResourceType::Granite,
        "water" => ResourceType::Water,
        "fish" => ResourceType::Fish,
        other => return Err(format!("unknown resource {other:?}")),
    };
    let amount = amount
        .trim()
        .parse()
        .map_err(|e| format!("bad amount in {s:?}: {e}"))?;
    Ok((pt, Resource::new(kind, amount)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_parse() {
        assert_eq!(parse_point("3,4"), Ok(MapPoint::new(3, 4)));
        assert_eq!(parse_point(" 10 , 2 "), Ok(MapPoint::new(10, 2)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
    }

    #[test]
    fn deposits_parse() {
        assert_eq!(
            parse_deposit("12,30,gold,5"),
            Ok((MapPoint::new(12, 30), Resource::new(ResourceType::Gold, 5)))
        );
        assert_eq!(
            parse_deposit("1, 2, Fish, 9"),
            Ok((MapPoint::new(1, 2), Resource::new(ResourceType::Fish, 9)))
        );
        assert!(parse_deposit("1,2,gold").is_err());
        assert!(parse_deposit("1,2,mithril,3").is_err());
        assert!(parse_deposit("1,2,coal,300").is_err());
    }

    #[test]
    fn reference_world_layout() {
        let world = reference_world(64, 1, 2).unwrap();
        assert_eq!(world.players().len(), 3);
        assert_eq!(world.players()[0].state, PlayerState::Human);
        assert_eq!(world.players()[2].state, PlayerState::Ai);
        assert_eq!(world.players()[1].hq(), Some(MapPoint::new(24, 8)));
        assert!(world.events().is_empty());
    }

    #[test]
    fn reference_world_limits() {
        assert!(reference_world(64, 0, 0).is_err());
        assert!(reference_world(64, 5, 4).is_err());
        assert!(reference_world(16, 1, 0).is_err());
        assert!(reference_world(64, 4, 4).is_ok());
    }

    #[test]
    fn cli_parses_play() {
        let cli = Cli::try_parse_from([
            "skirmish-cli",
            "play",
            "--keys",
            "winter <F7>",
            "--place",
            "30,30",
            "--chat",
            "apocalypsis",
            "--resource",
            "3,3,coal,2",
        ])
        .unwrap();
        let Commands::Play {
            keys,
            place,
            chat,
            resource,
            ..
        } = cli.command
        else {
            panic!("expected play");
        };
        assert_eq!(keys, "winter <F7>");
        assert_eq!(place, vec![MapPoint::new(30, 30)]);
        assert_eq!(chat, vec!["apocalypsis".to_string()]);
        assert_eq!(resource, vec![(MapPoint::new(3, 3), Resource::new(ResourceType::Coal, 2))]);
    }
}
