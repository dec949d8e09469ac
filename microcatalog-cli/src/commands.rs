use clap::{Args, ValueEnum};
use microcatalog_client::{ApiClient, HttpMicroserviceApi, HttpTeamApi, MicroserviceApi, QueryRequest, TeamApi};
use microcatalog_console::{History, MicroserviceResolver, MicroserviceRoute, MicroserviceUpdate};
use microcatalog_core::config::ConsoleConfig;
use microcatalog_core::{Microservice, Team};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Existing microservice to edit; omit to create one
    #[arg(long)]
    pub id: Option<i64>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub swagger_url: Option<String>,

    #[arg(long)]
    pub git_url: Option<String>,

    /// Owning team id
    #[arg(long, conflicts_with = "clear_team")]
    pub team: Option<i64>,

    /// Detach the microservice from its team
    #[arg(long)]
    pub clear_team: bool,
}

impl EditArgs {
    /// `(control, text)` for every text field given on the command line.
    fn text_edits(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("imageUrl", &self.image_url),
            ("swaggerUrl", &self.swagger_url),
            ("gitUrl", &self.git_url),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Team from the loaded list, or a bare reference when the list lacks it.
pub fn pick_team(teams: &[Team], id: i64) -> Team {
    teams
        .iter()
        .find(|t| t.id == Some(id))
        .cloned()
        .unwrap_or_else(|| Team::reference(id))
}

pub fn render(microservice: &Microservice, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(microservice)?,
        OutputFormat::Yaml => serde_yaml::to_string(microservice)?,
    })
}

/// Wired collaborators for one command.
pub struct Context {
    microservices: Arc<dyn MicroserviceApi>,
    teams: Arc<dyn TeamApi>,
    team_query: QueryRequest,
}

impl Context {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api)?;
        let team_query = match config.teams.page_size {
            Some(size) => QueryRequest::paged(0, size),
            None => QueryRequest::default(),
        };
        Ok(Self {
            microservices: Arc::new(HttpMicroserviceApi::new(client.clone())),
            teams: Arc::new(HttpTeamApi::new(client)),
            team_query,
        })
    }

    /// Run the edit form once. True when the save went through.
    pub async fn edit(&self, args: EditArgs) -> anyhow::Result<bool> {
        let history = Arc::new(History::new(MicroserviceRoute::ROOT));
        let route = MicroserviceRoute::for_edit(args.id);
        history.push(route.to_string());

        let resolved = MicroserviceResolver::new(Arc::clone(&self.microservices))
            .resolve_route(route)
            .await?;

        let controller = MicroserviceUpdate::new(
            Arc::clone(&self.microservices),
            Arc::clone(&self.teams),
            history.clone(),
        )
        .with_team_query(self.team_query.clone());
        controller.init(&resolved);
        controller.teams_loaded().await;

        for (field, text) in args.text_edits() {
            controller.set_text(field, Some(text))?;
        }
        if let Some(team_id) = args.team {
            let teams = controller.teams();
            if !teams.iter().any(|t| t.id == Some(team_id)) {
                warn!(team = team_id, "Team not in the loaded list, sending bare reference");
            }
            controller.select_team(Some(&pick_team(&teams, team_id)))?;
        } else if args.clear_team {
            controller.select_team(None)?;
        }

        controller.save().await;
        let saved = history.depth() == 1;
        if saved {
            info!(route = %route, "Saved");
        }
        Ok(saved)
    }

    pub async fn teams(&self) -> anyhow::Result<()> {
        let teams = self
            .teams
            .query(&self.team_query)
            .await?
            .into_body()
            .unwrap_or_default();
        for (index, team) in teams.iter().enumerate() {
            let key = MicroserviceUpdate::track_by_id(index, team)
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            println!("{key}\t{}", team.label());
        }
        Ok(())
    }

    pub async fn show(&self, id: i64, format: OutputFormat) -> anyhow::Result<()> {
        let microservice = MicroserviceResolver::new(Arc::clone(&self.microservices))
            .resolve_route(MicroserviceRoute::View(id))
            .await?;
        println!("{}", render(&microservice, format)?);
        Ok(())
    }
}
