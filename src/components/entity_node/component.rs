use leptos::ev;
use leptos::prelude::*;

use super::transitions::{
	AttributeEdit, EntityField, add_attribute, detach_entity, edit_attribute, edit_entity,
	remove_attribute, remove_entity, toggle_open,
};
use crate::components::diagram::{
	EntityData, NodeId, TypeVocabulary, use_diagram, use_type_vocabulary,
};

/// Editable box for one entity: name, attribute list, collapse and delete controls.
///
/// All edits are written back to the diagram store; the node itself holds no state.
#[component]
pub fn EntityNode(#[prop(into)] id: NodeId) -> impl IntoView {
	let store = use_diagram();
	let vocabulary = StoredValue::new(use_type_vocabulary());
	let dom_id = id.to_string();
	let id = StoredValue::new(id);
	let data = Memo::new(move |_| id.with_value(|id| store.entity(id)));

	let name = move || data.with(|d| d.as_ref().map(|d| d.name.clone()).unwrap_or_default());
	let is_open = move || data.with(|d| d.as_ref().is_some_and(|d| d.open));
	let attribute_count = move || data.with(|d| d.as_ref().map_or(0, |d| d.attributes.len()));

	let on_rename = move |ev: ev::Event| {
		let (id, value) = (id.get_value(), event_target_value(&ev));
		store.set_nodes(|nodes| edit_entity(nodes, &id, EntityField::Name, value));
	};
	let on_add = move |_: ev::MouseEvent| {
		let (id, vocabulary) = (id.get_value(), vocabulary.get_value());
		store.set_nodes(|nodes| add_attribute(nodes, &id, &vocabulary));
	};
	let on_toggle = move |_: ev::MouseEvent| {
		let id = id.get_value();
		store.set_nodes(|nodes| toggle_open(nodes, &id));
	};
	let on_delete = move |_: ev::MouseEvent| {
		let id = id.get_value();
		store.set_edges(|edges| detach_entity(edges, &id));
		store.set_nodes(|nodes| remove_entity(nodes, &id));
	};

	view! {
		<div class="entity-node" data-node-id=dom_id>
			<div class="entity-node__handle entity-node__handle--target" data-handle="target" />
			<div class="entity-node__grip" data-grip="" title="Drag to move" />
			<input
				class="entity-node__name"
				name="name"
				placeholder="Entity Name"
				prop:value=name
				on:input=on_rename
			/>
			<Show when=is_open>
				<div class="entity-node__attributes">
					<For
						each=move || 0..attribute_count()
						key=|index| *index
						children=move |index| {
							view! {
								<AttributeRow id=id index=index data=data vocabulary=vocabulary />
							}
						}
					/>
					<button class="entity-node__add" title="Add attribute" on:click=on_add>
						"+"
					</button>
				</div>
			</Show>
			<div class="entity-node__footer">
				<button title="Show or hide attributes" on:click=on_toggle>
					{move || if is_open() { "Collapse" } else { "Expand" }}
				</button>
				<button class="destructive" title="Delete entity" on:click=on_delete>
					"Delete"
				</button>
			</div>
			<div class="entity-node__handle entity-node__handle--source" data-handle="source" />
		</div>
	}
}

#[component]
fn AttributeRow(
	id: StoredValue<NodeId>,
	index: usize,
	data: Memo<Option<EntityData>>,
	vocabulary: StoredValue<TypeVocabulary>,
) -> impl IntoView {
	let store = use_diagram();
	let attribute = move || {
		data.with(|d| {
			d.as_ref()
				.and_then(|d| d.attributes.get(index).cloned())
				.unwrap_or_default()
		})
	};

	let edit = move |edit: AttributeEdit| {
		let id = id.get_value();
		store.set_nodes(|nodes| edit_attribute(nodes, &id, index, edit));
	};
	let on_name = move |ev: ev::Event| edit(AttributeEdit::Name(event_target_value(&ev)));
	let on_type = move |ev: ev::Event| edit(AttributeEdit::Type(event_target_value(&ev)));
	let on_remove = move |_: ev::MouseEvent| {
		let id = id.get_value();
		store.set_nodes(|nodes| remove_attribute(nodes, &id, index));
	};

	let options = vocabulary.with_value(|vocabulary| {
		vocabulary
			.iter()
			.map(|ty| {
				let (value, label, ty) = (ty.to_owned(), ty.to_owned(), ty.to_owned());
				view! {
					<option value=value selected=move || attribute().ty == ty>
						{label}
					</option>
				}
			})
			.collect_view()
	});

	view! {
		<div class="entity-node__attribute">
			<input
				name="name"
				placeholder="Attribute Name"
				prop:value=move || attribute().name
				on:input=on_name
			/>
			<select prop:value=move || attribute().ty on:change=on_type>
				{options}
			</select>
			<button class="destructive" title="Remove attribute" on:click=on_remove>
				"×"
			</button>
		</div>
	}
}
