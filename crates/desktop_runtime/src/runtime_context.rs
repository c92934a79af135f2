//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and host boot
//! wiring. Event translation stays in [`crate::desktop_shell`].

use leptos::*;
use platform_host::HostServices;

use crate::{
    desktop_icons::default_desktop_icons,
    desktop_shell, effect_executor,
    model::{DesktopState, InteractionState},
    persistence,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<HostServices>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize/icon-gesture interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Creates the signals and dispatch callback for one desktop instance.
    pub fn new(host_services: HostServices) -> Self {
        let viewport = host_services.viewport.current();
        let host = store_value(host_services);
        let state = create_rw_signal(DesktopState::new(viewport, default_desktop_icons()));
        let interaction = create_rw_signal(InteractionState::default());
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

        let dispatch = Callback::new(move |action: DesktopAction| {
            let mut desktop = state.get_untracked();
            let mut ui = interaction.get_untracked();
            let previous_desktop = desktop.clone();
            let previous_ui = ui.clone();

            let new_effects = reduce_desktop(&mut desktop, &mut ui, action);
            if desktop != previous_desktop {
                state.set(desktop);
            }
            if ui != previous_ui {
                interaction.set(ui);
            }
            if !new_effects.is_empty() {
                let mut queue = effects.get_untracked();
                queue.extend(new_effects);
                effects.set(queue);
            }
        });

        Self {
            host,
            state,
            interaction,
            effects,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

/// Loads the persisted icon layout once and hands it to the reducer.
fn install_boot_hydration(runtime: DesktopRuntimeContext) {
    let host = runtime.host.get_value();
    let desktop = runtime.state.get_untracked();
    let entries = desktop.icon_entries.clone();
    let cols = desktop.grid_metrics().cols;
    spawn_local(async move {
        let layout = persistence::load_icon_layout(host.prefs.as_ref(), &entries, cols).await;
        logging::log!(
            "icon layout hydrated ({} placements, {} host)",
            layout.len(),
            host.host_strategy.as_str()
        );
        runtime.dispatch_action(DesktopAction::HydrateIconLayout { layout });
    });
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    install_boot_hydration(runtime);
    desktop_shell::install_global_listeners(runtime);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let runtime = DesktopRuntimeContext::new(host_services);

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
