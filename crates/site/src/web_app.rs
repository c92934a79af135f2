use desktop_runtime::{
    handle_shell_double_click, handle_shell_pointer_down, use_desktop_runtime, window_frame,
    DesktopProvider, ResizeEdge,
};
use leptos::*;
use leptos_meta::*;
use platform_host_web::build_host_services;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Desktop" />
        <Meta name="description" content="Browser desktop with windows and a snapping icon grid." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider host_services=build_host_services()>
            <DesktopRoot />
        </DesktopProvider>
    }
}

/// Shell root. Presses anywhere inside are routed by their `data-*` attributes.
#[component]
fn DesktopRoot() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_count = move || runtime.state.with(|desktop| desktop.windows.len());
    let breakpoint = move || runtime.state.with(|desktop| format!("{:?}", desktop.breakpoint()));

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-breakpoint=breakpoint
            data-window-count=window_count
            on:pointerdown=move |ev| handle_shell_pointer_down(runtime, &ev)
            on:dblclick=move |ev| handle_shell_double_click(runtime, &ev)
        >
            <DesktopIcons />
            <DesktopWindows />
        </div>
    }
}

#[component]
fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();

    move || {
        let dragged = runtime.interaction.with(|ui| {
            ui.icon_gesture
                .drag_offset()
                .map(|(app_id, dx, dy)| (app_id.clone(), dx, dy))
        });
        runtime.state.with(|desktop| {
            let metrics = desktop.grid_metrics();
            desktop
                .icon_entries
                .iter()
                .filter_map(|entry| {
                    let cell = desktop.icon_layout.rendered_cell(
                        &entry.app_id,
                        &desktop.icon_entries,
                        &metrics,
                    )?;
                    let (mut x, mut y) = metrics.cell_origin(cell);
                    if let Some((_, dx, dy)) =
                        dragged.as_ref().filter(|(app_id, ..)| app_id == &entry.app_id)
                    {
                        x = x.saturating_add(*dx);
                        y = y.saturating_add(*dy);
                    }
                    let style = format!(
                        "position:absolute;left:{x}px;top:{y}px;width:{size}px;height:{size}px;",
                        size = metrics.cell_size
                    );
                    Some(view! {
                        <button
                            type="button"
                            class="desktop-icon"
                            data-desktop-icon=entry.app_id.to_string()
                            data-icon=entry.icon_ref.clone()
                            style=style
                        >
                            <span class="desktop-icon-label">{entry.label.clone()}</span>
                        </button>
                    })
                })
                .collect_view()
        })
    }
}

#[component]
fn DesktopWindows() -> impl IntoView {
    let runtime = use_desktop_runtime();

    move || {
        runtime.state.with(|desktop| {
            desktop
                .windows
                .stacking_order()
                .into_iter()
                .filter(|window| !window.minimized)
                .map(|window| {
                    let frame = window_frame(window, desktop.viewport);
                    let style = format!(
                        "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                        frame.x, frame.y, frame.w, frame.h, window.z_index
                    );
                    let active = desktop.windows.is_active(&window.id);
                    let handles = (!window.maximized).then(|| {
                        ResizeEdge::ALL
                            .into_iter()
                            .map(|edge| {
                                view! {
                                    <div
                                        class=format!("window-resize-handle {}", edge.token())
                                        data-window-part=edge.token()
                                    ></div>
                                }
                            })
                            .collect_view()
                    });
                    view! {
                        <section
                            class="desktop-window"
                            class:active=active
                            data-app-id=window.id.to_string()
                            style=style
                        >
                            <header class="window-titlebar" data-window-part="titlebar">
                                {window.title.clone()}
                            </header>
                            <div class="window-content" data-window-part="content"></div>
                            {handles}
                        </section>
                    }
                })
                .collect_view()
        })
    }
}
