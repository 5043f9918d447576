// ============================================================================
// Client script assets — DOM surgery for lists and comparison sync
// ============================================================================

/// List item controls: move up/down, toggle-all, button state upkeep after
/// HTMX swaps. Included once per page by the embedding application.
pub const LIST_MANIPULATION_JS: &str = r#"
function moveItem(buttonElement, direction) {
    const item = buttonElement.closest('li');
    if (!item) return;

    const container = item.parentElement;
    if (!container) return;

    const sibling = direction === 'up' ? item.previousElementSibling : item.nextElementSibling;

    if (sibling) {
        if (direction === 'up') {
            container.insertBefore(item, sibling);
        } else {
            container.insertBefore(item, sibling.nextElementSibling);
        }
        updateMoveButtons(container);
    }
}

function moveItemUp(buttonElement) { moveItem(buttonElement, 'up'); }
function moveItemDown(buttonElement) { moveItem(buttonElement, 'down'); }

function updateMoveButtons(container) {
    const items = container.querySelectorAll(':scope > li');
    items.forEach((item, index) => {
        const upButton = item.querySelector('button[onclick^="moveItemUp"]');
        const downButton = item.querySelector('button[onclick^="moveItemDown"]');

        if (upButton) upButton.disabled = (index === 0);
        if (downButton) downButton.disabled = (index === items.length - 1);
    });
}

function toggleListItems(containerId) {
    const containerElement = document.getElementById(containerId);
    if (!containerElement) {
        console.warn('Accordion container not found:', containerId);
        return;
    }

    const items = Array.from(containerElement.children).filter(el => el.tagName === 'LI');
    if (!items.length) return;

    // Open all if any are closed, otherwise close all
    const shouldOpen = items.some(item => !item.classList.contains('uk-open'));

    items.forEach(item => {
        const content = item.querySelector('.uk-accordion-content');
        if (shouldOpen) {
            item.classList.add('uk-open');
            if (content) { content.style.height = 'auto'; content.hidden = false; }
        } else {
            item.classList.remove('uk-open');
            if (content) { content.hidden = true; }
        }
    });
}

document.addEventListener('DOMContentLoaded', () => {
    document.querySelectorAll('[id$="_items_container"]').forEach(container => {
        updateMoveButtons(container);
    });

    document.body.addEventListener('htmx:afterSwap', function(event) {
        const targetElement = event.detail.target;
        const requestElement = event.detail.requestConfig?.elt;
        const swapStrategy = requestElement ? requestElement.getAttribute('hx-swap') : null;

        if (swapStrategy === 'afterend') {
            const listContainer = targetElement.closest('[id$="_items_container"]');
            if (listContainer) updateMoveButtons(listContainer);
        } else {
            const containers = targetElement.querySelectorAll('[id$="_items_container"]');
            containers.forEach(container => updateMoveButtons(container));

            if (targetElement.id && targetElement.id.endsWith('_items_container')) {
                updateMoveButtons(targetElement);
            }
        }
    });
});
"#;

/// Comparison support: field-level copy across sides by `data-field-path`
/// and accordion state mirroring. Copy never touches the peer column's
/// expand/collapse state.
pub const COMPARISON_SYNC_JS: &str = r#"
window.sfPerformCopy = function(pathPrefix, currentPrefix, copyTarget) {
  try {
    window.__sfCopyInProgress = true;

    // Snapshot accordion states so copy never collapses anything
    var accordionStates = [];
    document.querySelectorAll('ul[uk-accordion] > li').forEach(function(li) {
      accordionStates.push({ element: li, isOpen: li.classList.contains('uk-open') });
    });

    // The button lives on the target side; the source is the other prefix
    var sourcePrefix = (copyTarget === 'left') ? window.__sfRightPrefix : window.__sfLeftPrefix;

    var allInputs = document.querySelectorAll('[data-field-path][name^="' + sourcePrefix + '"]');
    var sourceInputs = Array.from(allInputs).filter(function(el) {
      var fp = el.getAttribute('data-field-path');
      return fp === pathPrefix || fp.startsWith(pathPrefix + '.') || fp.startsWith(pathPrefix + '[');
    });

    sourceInputs.forEach(function(sourceInput) {
      var fp = sourceInput.getAttribute('data-field-path');
      var targetInput = document.querySelector('[data-field-path="' + fp + '"]:not([name^="' + sourcePrefix + '"])');
      if (!targetInput) return;

      var tag = sourceInput.tagName.toUpperCase();
      var type = (sourceInput.type || '').toLowerCase();

      if (type === 'checkbox') {
        targetInput.checked = sourceInput.checked;
      } else if (tag === 'SELECT') {
        targetInput.value = sourceInput.value;
      } else if (tag === 'TEXTAREA') {
        targetInput.value = sourceInput.value;
        targetInput.textContent = sourceInput.value;
      } else {
        targetInput.value = sourceInput.value;
      }
    });

    setTimeout(function() {
      accordionStates.forEach(function(state) {
        if (state.isOpen && !state.element.classList.contains('uk-open')) {
          state.element.classList.add('uk-open');
          var content = state.element.querySelector('.uk-accordion-content');
          if (content) { content.hidden = false; content.style.height = 'auto'; }
        }
      });
      window.__sfCopyInProgress = false;
    }, 150);

  } catch (e) {
    console.error('[schema-form] copy error', e);
    window.__sfCopyInProgress = false;
  }
};

window.sfInitComparisonSync = function initComparisonSync() {
  if (window.__sfSyncBound) return;
  window.__sfSyncBound = true;

  document.addEventListener('click', function(ev) {
    if (window.__sfCopyInProgress) return;

    var title = ev.target.closest('.uk-accordion-title');
    if (!title) return;

    var sourceLi = title.closest('li');
    if (!sourceLi) return;

    var cell = sourceLi.closest('[data-path]');
    if (!cell) return;
    var path = cell.dataset.path;

    var idx = Array.prototype.indexOf.call(sourceLi.parentElement.children, sourceLi);

    // Mirror after this column's own toggle settles
    setTimeout(function() {
      var opening = sourceLi.classList.contains('uk-open');

      document.querySelectorAll('[data-path="' + path + '"]').forEach(function(peerCell) {
        if (peerCell === cell) return;

        var peerAcc = peerCell.querySelector('ul[uk-accordion]');
        if (!peerAcc || idx >= peerAcc.children.length) return;

        var peerLi = peerAcc.children[idx];
        var peerContent = peerLi.querySelector('.uk-accordion-content');

        if (opening) {
          peerLi.classList.add('uk-open');
          if (peerContent) { peerContent.hidden = false; peerContent.style.height = 'auto'; }
        } else {
          peerLi.classList.remove('uk-open');
          if (peerContent) { peerContent.hidden = true; }
        }
      });
    }, 0);
  });

  // Wrap toggleListItems so list-level toggles mirror too
  if (typeof window.toggleListItems === 'function' && !window.__sfListSyncWrapped) {
    window.__sfListSyncWrapped = true;
    const originalToggle = window.toggleListItems;

    window.toggleListItems = function(containerId) {
      originalToggle(containerId);

      const container = document.getElementById(containerId);
      if (!container) return;
      const cell = container.closest('[data-path]');
      if (!cell) return;
      const path = cell.dataset.path;

      document.querySelectorAll('[data-path="' + path + '"]').forEach(peerCell => {
        if (peerCell === cell) return;
        const peerContainer = peerCell.querySelector('[id$="_items_container"]');
        if (peerContainer) originalToggle(peerContainer.id);
      });
    };
  }
};

window.sfInitComparisonSync();

document.addEventListener('htmx:afterSwap', function(event) {
  window.sfInitComparisonSync();
});
"#;
