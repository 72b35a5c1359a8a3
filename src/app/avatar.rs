use leptos::prelude::*;

#[component]
pub fn Headshot(src: &'static str, alt: &'static str) -> impl IntoView {
    view! {
        <div class="w-48 h-48 md:w-64 md:h-64 rounded-full bg-gradient-to-br from-pink-200 via-purple-200 to-indigo-200 flex items-center justify-center shadow-xl flex-shrink-0 overflow-hidden">
            <div class="w-full h-full rounded-full bg-gradient-to-br from-rose-100 via-blue-100 to-teal-100 flex items-center justify-center">
                <img src=src alt=alt class="w-full h-full object-cover" />
            </div>
        </div>
    }
}
