use crate::domain::{
    ActorCommand, GlobalCommand, HitEvent, Inbound, LegacyCommand, Outbound, ReportPayload,
    Transport, TransportError, VoxelSnapshot,
};
use crate::interface_adapters::protocol::{
    CommandListDto, EmptyBody, GameEventDto, ReportDto, StateDto, UnmuteDto,
    parse_actor_command, parse_global_commands, parse_legacy_commands,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// Thin reqwest client for the decision service.
#[derive(Clone)]
pub struct AiServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl AiServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn report(&self, payload: &ReportPayload) -> Result<(), TransportError> {
        self.post("/v1/report", &ReportDto::from(payload)).await?;
        Ok(())
    }

    pub async fn push_state(&self, snapshot: &VoxelSnapshot) -> Result<(), TransportError> {
        self.post("/v1/mc/state", &StateDto::from(snapshot)).await?;
        Ok(())
    }

    pub async fn send_hit(&self, hit: &HitEvent) -> Result<(), TransportError> {
        self.post("/v1/mc/events", &GameEventDto::from(hit)).await?;
        Ok(())
    }

    pub async fn request_unmute(&self, mc_name: &str) -> Result<(), TransportError> {
        let body = UnmuteDto {
            mc_name: mc_name.to_string(),
        };
        self.post("/v1/discord/unmute", &body).await?;
        Ok(())
    }

    pub async fn next_move(&self) -> Result<ActorCommand, TransportError> {
        let response = self.post("/v1/mc/next_move", &EmptyBody {}).await?;
        let body = decode::<serde_json::Value>(response).await?;
        Ok(parse_actor_command(body))
    }

    pub async fn pull_legacy(&self) -> Result<Vec<LegacyCommand>, TransportError> {
        let response = self.post("/v1/pull", &EmptyBody {}).await?;
        let list = decode::<CommandListDto>(response).await?;
        Ok(parse_legacy_commands(list))
    }

    pub async fn poll_commands(&self) -> Result<Vec<GlobalCommand>, TransportError> {
        let url = format!("{}/v1/mc/commands", self.base_url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        let list = decode::<CommandListDto>(check_status(response)?).await?;
        Ok(parse_global_commands(list))
    }

    async fn post<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        check_status(response)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(TransportError::Upstream {
        status: response.status().as_u16(),
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    response
        .json::<T>()
        .await
        .map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl Transport for AiServiceClient {
    async fn deliver(&self, request: Outbound) -> Result<Option<Inbound>, TransportError> {
        match request {
            Outbound::Report(payload) => self.report(&payload).await.map(|_| None),
            Outbound::State(snapshot) => self.push_state(&snapshot).await.map(|_| None),
            Outbound::Hit(hit) => self.send_hit(&hit).await.map(|_| None),
            Outbound::Unmute { mc_name } => self.request_unmute(&mc_name).await.map(|_| None),
            Outbound::NextMove { actor_id } => {
                let command = self.next_move().await?;
                Ok(Some(Inbound::NextMove { actor_id, command }))
            }
            Outbound::LegacyPull { actor_id } => {
                let commands = self.pull_legacy().await?;
                Ok(Some(Inbound::LegacyCommands { actor_id, commands }))
            }
            Outbound::PollCommands => {
                let commands = self.poll_commands().await?;
                Ok(Some(Inbound::GlobalCommands(commands)))
            }
        }
    }
}
