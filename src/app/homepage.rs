use leptos::{ev::MouseEvent, html, prelude::*};
use leptos_meta::Title;

use crate::config::SiteConfig;
use crate::reveal::reveal;
use crate::section::Section;
use crate::visibility::VisibilitySet;

use super::avatar::Headshot;
use super::contact::{CopyEmailButton, ExternalLink};
use super::icons::{ChevronDown, FileText, Linkedin, HOVER_GROW};

type SectionRefs = [NodeRef<html::Section>; Section::COUNT];

#[component]
pub fn HomePage() -> impl IntoView {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let sections: SectionRefs = std::array::from_fn(|_| NodeRef::new());
    let visible = RwSignal::new(VisibilitySet::default());

    #[cfg(feature = "hydrate")]
    track_visibility(sections, visible);

    let scroll_to_next = move |_: MouseEvent| {
        let target = sections[Section::SCROLL_TARGET.index()].get_untracked();
        #[cfg(feature = "hydrate")]
        crate::scroll::scroll_to(target.as_deref());
        #[cfg(not(feature = "hydrate"))]
        let _ = target;
    };

    let [hero_ref, about_ref, contact_ref] = sections;

    view! {
        <Title text=config.owner />
        <div class="min-h-screen bg-gradient-to-br from-rose-50 via-blue-50 to-teal-50">
            <section
                node_ref=hero_ref
                class="min-h-screen flex flex-col items-center justify-center px-6 relative"
            >
                <Reveal section=Section::Hero visible=visible class="text-center">
                    <h1 class="text-5xl md:text-7xl lg:text-8xl font-light text-slate-700 mb-6 tracking-tight">
                        "HELLO"
                    </h1>
                </Reveal>
                <button
                    on:click=scroll_to_next
                    class="absolute bottom-12 animate-bounce text-slate-400 hover:text-slate-600 transition-colors"
                    aria-label="Scroll down"
                >
                    <ChevronDown size=40 />
                </button>
            </section>

            <section
                node_ref=about_ref
                class="min-h-screen flex items-center justify-center px-6 py-20"
            >
                <Reveal section=Section::About visible=visible class="max-w-4xl mx-auto">
                    <div class="flex flex-col md:flex-row items-center gap-12">
                        <div class="text-center">
                            <h2 class="text-4xl md:text-5xl font-light text-slate-700 mb-6">
                                "IS IT ME"
                            </h2>
                            <Headshot src=config.headshot_path alt=config.owner />
                        </div>
                    </div>
                </Reveal>
            </section>

            <section
                node_ref=contact_ref
                class="min-h-screen flex items-center justify-center px-6 py-20"
            >
                <Reveal
                    section=Section::Contact
                    visible=visible
                    class="max-w-5xl mx-auto text-center"
                >
                    <h2 class="text-center text-4xl md:text-5xl font-light text-slate-700 mb-8">
                        "YOU'RE LOOKING FOR?"
                    </h2>
                    <div class="flex flex-col sm:flex-row gap-4 justify-center items-center">
                        <ExternalLink href=config.profile_url label="LinkedIn">
                            <Linkedin class=HOVER_GROW />
                        </ExternalLink>
                        <CopyEmailButton email=config.email display=config.copied_display />
                        <ExternalLink href=config.resume_path label="Resume">
                            <FileText class=HOVER_GROW />
                        </ExternalLink>
                    </div>
                </Reveal>
            </section>
        </div>
    }
}

/// Fades its children in once `section` is in the viewport.
#[component]
fn Reveal(
    section: Section,
    visible: RwSignal<VisibilitySet>,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let style = move || reveal(section, visible.with(|v| v.is_visible(section))).class_with(class);
    view! { <div class=style>{children()}</div> }
}

#[cfg(feature = "hydrate")]
fn track_visibility(sections: SectionRefs, visible: RwSignal<VisibilitySet>) {
    use crate::visibility::VisibilityTracker;
    use crate::web::IntersectionWatcher;

    let tracker = StoredValue::new_local(None::<VisibilityTracker<IntersectionWatcher>>);

    // runs once the section nodes are mounted
    Effect::new(move |_| {
        let targets = sections
            .iter()
            .map(|s| s.get_untracked().map(web_sys::Element::from))
            .collect();
        let mounted = VisibilityTracker::mount(IntersectionWatcher, targets, move |index, is_visible| {
            visible.update(|set| {
                if let Err(err) = set.apply(index, is_visible) {
                    log::warn!("ignoring visibility change: {err}");
                }
            });
        });
        log::debug!("observing {} sections", mounted.observed());
        tracker.set_value(Some(mounted));
    });

    on_cleanup(move || {
        tracker.try_update_value(|t| {
            if let Some(mut t) = t.take() {
                t.teardown();
            }
        });
    });
}
