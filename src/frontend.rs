use chrono::{DateTime, Utc};
use js_sys::{Array, Reflect};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    Window,
};

use crate::commands::CommandRegistry;
use crate::config::{EffectsConfig, StatsConfig};
use crate::contract::{
    ACTIVE_CLASS, DATA_REPO, DATA_TARGET, DATA_WIDTH, GALLERY_COMMAND, GALLERY_MAIN_IMG_ID,
    GALLERY_THUMB, GITHUB_STATS, GITHUB_STATS_BADGES, HAMBURGER_ID, HEADER_ID, IN_PAGE_ANCHOR,
    NAV_LINK, NAV_LINKS_ID, OPEN_CLASS, REVEAL, SCROLLED_CLASS, SKILL_FILL, STAT_NUMBER,
    VISIBLE_CLASS,
};
use crate::dom::{self, has_class, on, query_all, query_all_within, set_class};
use crate::effects::{
    anchor_selector, counter_target, is_header_scrolled, skill_width, CounterAnimation,
    CounterFrame, OneShotSet,
};
use crate::gallery::{thumb_flags, GalleryImage, SwapSequencer};
use crate::github::GithubClient;
use crate::nav::{active_links, current_page, MenuState};
use crate::stats::{RepoId, StatsSlot, StatsSlots, StatsUpdate};

struct GallerySwitch {
    image: GalleryImage,
    thumb: Option<Element>,
}

/// Wires every page behavior. Call once after the document is parsed.
pub fn run() {
    let Some(win) = window() else {
        dom::error("portfolio-interactions: no window");
        return;
    };
    let Some(document) = win.document() else {
        dom::error("portfolio-interactions: no document");
        return;
    };

    let effects = EffectsConfig::default();

    wire_mobile_nav(&document);
    wire_sticky_header(&win, &document, effects.header_scroll_threshold_px);
    mark_active_link(&win, &document);
    wire_reveal(&document, effects.reveal_threshold);
    wire_skill_bars(&document, effects.skill_threshold);
    wire_counters(&document, effects.counter_threshold, effects.counter_frames());
    wire_smooth_anchors(&document);
    install_commands(&win, &document, effects.gallery_fade_ms);
    load_github_stats(&document, &StatsConfig::default());
}

fn set_menu(hamburger: &Element, nav_links: &Element, state: MenuState) {
    set_class(hamburger, OPEN_CLASS, state.is_open());
    set_class(nav_links, OPEN_CLASS, state.is_open());
}

fn wire_mobile_nav(document: &Document) {
    let (Some(hamburger), Some(nav_links)) = (
        document.get_element_by_id(HAMBURGER_ID),
        document.get_element_by_id(NAV_LINKS_ID),
    ) else {
        return;
    };

    {
        let toggle = hamburger.clone();
        let panel = nav_links.clone();
        on(&hamburger, "click", move |_| {
            let next = MenuState::from_open(has_class(&toggle, OPEN_CLASS)).toggled();
            set_menu(&toggle, &panel, next);
        });
    }

    for link in query_all_within(&nav_links, NAV_LINK) {
        let toggle = hamburger.clone();
        let panel = nav_links.clone();
        on(&link, "click", move |_| set_menu(&toggle, &panel, MenuState::Closed));
    }
}

fn wire_sticky_header(win: &Window, document: &Document, threshold_px: f64) {
    let Some(header) = document.get_element_by_id(HEADER_ID) else {
        return;
    };

    let scroller = win.clone();
    on(win, "scroll", move |_| {
        let scroll_y = scroller.scroll_y().unwrap_or(0.0);
        set_class(&header, SCROLLED_CLASS, is_header_scrolled(scroll_y, threshold_px));
    });
}

fn mark_active_link(win: &Window, document: &Document) {
    let pathname = win.location().pathname().unwrap_or_default();
    let page = current_page(&pathname);

    let links = query_all(document, NAV_LINK);
    let hrefs: Vec<Option<String>> = links.iter().map(|link| link.get_attribute("href")).collect();
    let flags = active_links(hrefs.iter().map(Option::as_deref), page);

    for (link, active) in links.iter().zip(flags) {
        set_class(link, ACTIVE_CLASS, active);
    }
}

/// Observes every match of `selector` until it first crosses `threshold`,
/// then runs `effect` on it once and stops observing it.
fn observe_once(
    document: &Document,
    selector: &str,
    threshold: f64,
    effect: impl Fn(&Element) + 'static,
) {
    let targets = query_all(document, selector);
    if targets.is_empty() {
        return;
    }

    let pending = Rc::new(RefCell::new(OneShotSet::new()));
    let callback = {
        let pending = pending.clone();
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let fired = pending
                        .borrow_mut()
                        .trigger(&entry.target(), entry.is_intersecting());
                    if let Some(element) = fired {
                        observer.unobserve(&element);
                        effect(&element);
                    }
                }
                if pending.borrow().is_empty() {
                    observer.disconnect();
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            dom::warn(&format!("visibility observer unavailable for {selector}: {err:?}"));
            return;
        }
    };
    callback.forget();

    for target in targets {
        if pending.borrow_mut().subscribe(target.clone()) {
            observer.observe(&target);
        }
    }
}

fn wire_reveal(document: &Document, threshold: f64) {
    observe_once(document, REVEAL, threshold, |element| {
        set_class(element, VISIBLE_CLASS, true);
    });
}

fn wire_skill_bars(document: &Document, threshold: f64) {
    observe_once(document, SKILL_FILL, threshold, |element| {
        let raw = element.get_attribute(DATA_WIDTH);
        let Some(width) = skill_width(raw.as_deref()) else {
            dom::warn(&format!("skill bar has invalid {DATA_WIDTH}: {raw:?}"));
            return;
        };
        if let Some(bar) = element.dyn_ref::<HtmlElement>() {
            let _ = bar.style().set_property("width", &width);
        }
    });
}

fn wire_counters(document: &Document, threshold: f64, frames: f64) {
    observe_once(document, STAT_NUMBER, threshold, move |element| {
        let raw = element.get_attribute(DATA_TARGET);
        match counter_target(raw.as_deref()) {
            Some(target) => animate_counter(element.clone(), target, frames),
            None => dom::warn(&format!("counter has invalid {DATA_TARGET}: {raw:?}")),
        }
    });
}

fn request_frame(callback: &Closure<dyn FnMut()>) {
    if let Some(win) = window() {
        let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

/// Runs to completion once started, one step per animation frame.
fn animate_counter(element: Element, target: i64, frames: f64) {
    let mut animation = CounterAnimation::new(target, frames);
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = tick.clone();

    *tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let Some(frame) = animation.next() else {
            return;
        };
        element.set_text_content(Some(&frame.value().to_string()));

        if matches!(frame, CounterFrame::Finished(_)) {
            let _ = handle.borrow_mut().take();
        } else if let Some(next) = handle.borrow().as_ref() {
            request_frame(next);
        }
    }));

    if let Some(first) = tick.borrow().as_ref() {
        request_frame(first);
    }
}

fn wire_smooth_anchors(document: &Document) {
    for anchor in query_all(document, IN_PAGE_ANCHOR) {
        let link = anchor.clone();
        let document = document.clone();
        on(&anchor, "click", move |event: Event| {
            let href = link.get_attribute("href");
            let Some(selector) = anchor_selector(href.as_deref()) else {
                return;
            };

            match document.query_selector(selector) {
                Ok(Some(target)) => {
                    event.prevent_default();
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
                Ok(None) => {}
                Err(_) => dom::warn(&format!(
                    "smooth scroll target not found or invalid: {selector}"
                )),
            }
        });
    }
}

fn switch_gallery_image(
    win: &Window,
    document: &Document,
    sequencer: &Rc<SwapSequencer>,
    fade_ms: i32,
    switch: GallerySwitch,
) {
    let main_image = document
        .get_element_by_id(GALLERY_MAIN_IMG_ID)
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok());

    if let Some(main_image) = main_image {
        let _ = main_image.style().set_property("opacity", "0");

        let ticket = sequencer.begin();
        let sequencer = sequencer.clone();
        let image = switch.image;
        let swap = Closure::once_into_js(move || {
            if !sequencer.is_current(ticket) {
                return;
            }
            main_image.set_src(&image.src);
            main_image.set_alt(&image.alt);
            let _ = main_image.style().set_property("opacity", "1");
        });

        if let Err(err) = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(swap.unchecked_ref(), fade_ms)
        {
            dom::warn(&format!("gallery swap could not be scheduled: {err:?}"));
        }
    }

    let Some(chosen) = switch.thumb else {
        return;
    };
    let thumbs = query_all(document, GALLERY_THUMB);
    for (thumb, active) in thumbs.iter().zip(thumb_flags(&thumbs, &chosen)) {
        set_class(thumb, ACTIVE_CLASS, active);
    }
    if !thumbs.contains(&chosen) {
        set_class(&chosen, ACTIVE_CLASS, true);
    }
}

/// Exposes the markup-facing commands on `window`.
fn install_commands(win: &Window, document: &Document, fade_ms: i32) {
    let sequencer = Rc::new(SwapSequencer::new());
    let mut registry = CommandRegistry::new();
    {
        let win = win.clone();
        let document = document.clone();
        registry.register(GALLERY_COMMAND, move |switch: GallerySwitch| {
            switch_gallery_image(&win, &document, &sequencer, fade_ms, switch);
        });
    }
    let registry = Rc::new(registry);

    for name in registry.names() {
        let registry = registry.clone();
        let entry = Closure::<dyn FnMut(JsValue, JsValue, JsValue)>::new(
            move |src: JsValue, alt: JsValue, thumb: JsValue| {
                let switch = GallerySwitch {
                    image: GalleryImage {
                        src: src.as_string().unwrap_or_default(),
                        alt: alt.as_string().unwrap_or_default(),
                    },
                    thumb: thumb.dyn_into::<Element>().ok(),
                };
                registry.dispatch(name, switch);
            },
        );

        if let Err(err) = Reflect::set(win, &JsValue::from_str(name), entry.as_ref()) {
            dom::warn(&format!("could not expose {name}: {err:?}"));
        }
        entry.forget();
    }
}

struct DomStatsSlots(Element);

impl StatsSlots for DomStatsSlots {
    fn set_text(&mut self, slot: StatsSlot, text: &str) {
        if let Ok(Some(target)) = self.0.query_selector(slot.selector()) {
            target.set_text_content(Some(text));
        }
    }

    fn replace_badges(&mut self, html: &str) {
        if let Ok(Some(badges)) = self.0.query_selector(GITHUB_STATS_BADGES) {
            badges.set_inner_html(html);
        }
    }
}

fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

fn load_github_stats(document: &Document, config: &StatsConfig) {
    let containers = query_all(document, GITHUB_STATS);
    if containers.is_empty() {
        return;
    }

    let client = match GithubClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            dom::warn(&format!("GitHub stats disabled: {err}"));
            return;
        }
    };

    for container in containers {
        let raw = container.get_attribute(DATA_REPO).unwrap_or_default();
        let repo = match RepoId::parse(&raw) {
            Ok(repo) => repo,
            Err(err) => {
                dom::warn(&err.to_string());
                StatsUpdate::Unavailable.apply(&mut DomStatsSlots(container));
                continue;
            }
        };

        let client = client.clone();
        spawn_local(async move {
            let result = client.repo(&repo).await;
            if let Err(err) = &result {
                dom::warn(&format!("GitHub stats for {repo}: {err}"));
            }
            StatsUpdate::from_result(&result, now_utc()).apply(&mut DomStatsSlots(container));
        });
    }
}
