use super::snapshot::{
    ContextWindow, CostInfo, CurrentUsage, ModelInfo, Presence, SessionUsage, Snapshot,
    WorkspaceInfo,
};

/// A fully-populated snapshot used by `ccsl preview` and `ccsl theme`.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        hook_event_name: Some("Status".to_string()),
        session_id: Some("sample-session-123".to_string()),
        model: Some(ModelInfo {
            id: Some("claude-opus-4-1".to_string()),
            display_name: Some("Opus".to_string()),
            ..Default::default()
        }),
        workspace: Some(WorkspaceInfo {
            current_dir: Some("/home/user/my-project".to_string()),
            project_dir: Some("/home/user/my-project".to_string()),
            ..Default::default()
        }),
        version: Some("1.0.80".to_string()),
        cost: Some(CostInfo {
            total_cost_usd: Some(0.0234),
            total_duration_ms: Some(45_000),
            total_api_duration_ms: Some(2_300),
            total_lines_added: Some(156),
            total_lines_removed: Some(23),
            ..Default::default()
        }),
        context_window: Some(ContextWindow {
            total_input_tokens: Some(15_234),
            total_output_tokens: Some(4_521),
            context_window_size: Some(200_000),
            used_percentage: Some(42.5),
            remaining_percentage: Some(57.5),
            current_usage: Presence::Present(CurrentUsage {
                input_tokens: Some(8_500),
                output_tokens: Some(1_200),
                cache_creation_input_tokens: Some(5_000),
                cache_read_input_tokens: Some(2_000),
                ..Default::default()
            }),
            ..Default::default()
        }),
        session_usage: Some(SessionUsage {
            requests_used: Some(120),
            requests_limit: Some(500),
            plan: Some("Pro".to_string()),
            reset_in_seconds: Some(8_100),
            ..Default::default()
        }),
        ..Default::default()
    }
}
