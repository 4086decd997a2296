// -------------------------
// Tiny HTML dashboard
// -------------------------
//
// Search state, sort and filter live in the page (Alpine component); the
// server only scrapes and renders CSV.

pub const DASHBOARD_HTML: &str = r#"
<!doctype html>
<html lang="en" class="dark">
<head>
  <meta charset="utf-8" />
  <title>Charm Scraper</title>

  <!-- Tailwind (CDN) -->
  <script>
    tailwind.config = { darkMode: 'class' };
  </script>
  <script src="https://cdn.tailwindcss.com"></script>

  <!-- Alpine.js (CDN) -->
  <script defer src="https://unpkg.com/alpinejs@3.x.x/dist/cdn.min.js"></script>

  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>[x-cloak]{display:none!important}</style>
</head>
<body class="bg-slate-900 text-slate-100 antialiased">
  <main class="max-w-6xl mx-auto p-6 flex flex-col gap-6 min-h-dvh"
        x-data="charms()">

    <div class="flex items-end justify-between gap-3">
      <div>
        <h1 class="text-3xl font-bold tracking-tight">CS2 Charm Scraper</h1>
        <p class="text-sm text-slate-400">
          Search a <span class="font-mono">csgoskins.gg</span> tournament charm page and list every charm found.
        </p>
      </div>
      <button @click="exportCSV()"
              :disabled="view.length === 0"
              class="inline-flex items-center gap-2 px-2 py-1 text-sm rounded-md bg-slate-700 text-slate-100 font-medium hover:bg-slate-600 disabled:opacity-50 disabled:cursor-not-allowed">
        <svg xmlns="http://www.w3.org/2000/svg" class="h-3.5 w-3.5" viewBox="0 0 24 24" fill="currentColor"><path d="M12 3a1 1 0 011 1v9.586l2.293-2.293a1 1 0 111.414 1.414l-4.007 4.007a1 1 0 01-1.414 0L7.279 12.707a1 1 0 111.414-1.414L11 13.586V4a1 1 0 011-1z"/><path d="M5 15a1 1 0 112 0v3h10v-3a1 1 0 112 0v3a2 2 0 01-2 2H7a2 2 0 01-2-2v-3z"/></svg>
        <span>Export CSV</span>
      </button>
    </div>

    <!-- Source -->
    <div class="bg-slate-800 shadow-sm ring-1 ring-slate-700 rounded-xl p-4 space-y-3">
      <div class="text-sm font-semibold text-slate-300">Source URL</div>
      <div class="flex flex-col sm:flex-row gap-2">
        <input x-model="player"
               @keydown.enter="scrape()"
               type="text"
               class="w-full rounded-lg border-slate-700 bg-slate-900 text-slate-100 px-2 py-1.5 text-sm"
               placeholder="Player name, e.g. s1mple">
        <button @click="scrape()"
                :disabled="loading"
                class="inline-flex items-center gap-2 px-3 py-1.5 text-sm rounded-md bg-indigo-600 text-white font-medium hover:bg-indigo-700 disabled:opacity-50 disabled:cursor-not-allowed">
          <svg x-show="loading" xmlns="http://www.w3.org/2000/svg" class="animate-spin h-3.5 w-3.5" viewBox="0 0 24 24" fill="none"><circle class="opacity-30" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"/><path class="opacity-80" fill="currentColor" d="M4 12a8 8 0 018-8v4a4 4 0 00-4 4H4z"/></svg>
          <span x-text="loading ? 'Scraping…' : 'Fetch charms'"></span>
        </button>
      </div>
      <div class="text-xs text-slate-500 font-mono break-all" x-text="url()"></div>
      <div x-show="error" x-cloak class="text-sm text-red-400" x-text="error"></div>
      <div x-show="steam" x-cloak class="text-sm">
        <a class="text-indigo-400 hover:underline" :href="steam" target="_blank" rel="noreferrer">Steam market guess</a>
      </div>
    </div>

    <!-- Results -->
    <div class="bg-slate-800 shadow-sm ring-1 ring-slate-700 rounded-xl p-4 space-y-3">
      <div class="flex items-center gap-2 text-sm font-semibold text-slate-300">
        Results <span class="rounded-full bg-slate-700 px-2 text-xs" x-text="view.length"></span>
      </div>

      <div class="flex flex-col sm:flex-row gap-2 items-center">
        <input x-model="query"
               type="text"
               class="w-full rounded-lg border-slate-700 bg-slate-900 text-slate-100 px-2 py-1.5 text-sm"
               placeholder="Filter by title...">
        <div class="flex gap-2">
          <button @click="sortKey = sortKey === 'price' ? 'title' : 'price'"
                  class="px-2 py-1 text-sm rounded-md bg-slate-700 hover:bg-slate-600 whitespace-nowrap"
                  x-text="'Sort by ' + (sortKey === 'price' ? 'Title' : 'Price')"></button>
          <button @click="sortDir = sortDir === 'asc' ? 'desc' : 'asc'"
                  class="px-2 py-1 text-sm rounded-md bg-slate-700 hover:bg-slate-600"
                  x-text="sortDir.toUpperCase()"></button>
        </div>
      </div>

      <div class="grid gap-4 grid-cols-1 sm:grid-cols-2 lg:grid-cols-3">
        <template x-for="it in view" :key="it.link">
          <div class="rounded-2xl ring-1 ring-slate-700 bg-slate-900 p-4 flex flex-col">
            <div class="aspect-video bg-slate-800 rounded-xl overflow-hidden mb-3 grid place-items-center">
              <template x-if="it.image"><img :src="it.image" :alt="it.title || 'Charm'" class="w-full h-full object-cover"></template>
              <template x-if="!it.image"><span class="text-slate-500 text-sm">No image</span></template>
            </div>
            <div class="font-medium line-clamp-2" :title="it.title" x-text="it.title || 'Untitled charm'"></div>
            <div class="text-xs flex flex-wrap gap-2 mt-2 flex-1">
              <span x-show="it.price != null" class="rounded bg-slate-700 px-1.5" x-text="money(it.price)"></span>
              <span x-show="it.price == null && it.priceText" class="rounded bg-slate-700 px-1.5" x-text="it.priceText"></span>
              <span x-show="it.rarity" class="rounded bg-slate-800 px-1.5" x-text="it.rarity"></span>
              <span x-show="it.popularity" class="rounded bg-slate-800 px-1.5" x-text="it.popularity"></span>
              <span x-show="it.rating" class="rounded bg-slate-800 px-1.5" x-text="it.rating"></span>
            </div>
            <div class="mt-3 flex gap-4 text-sm">
              <a class="text-indigo-400 hover:underline" :href="it.link" target="_blank" rel="noreferrer">View item</a>
              <a x-show="it.externalMarketLink" class="text-indigo-400 hover:underline" :href="it.externalMarketLink" target="_blank" rel="noreferrer">Steam</a>
            </div>
          </div>
        </template>
      </div>

      <div class="overflow-auto rounded-lg">
        <table class="min-w-full text-sm">
          <thead class="bg-slate-700 sticky top-0 z-10">
            <tr class="text-left text-slate-100">
              <th class="px-3 py-2 font-medium">Title</th>
              <th class="px-3 py-2 font-medium">Price</th>
              <th class="px-3 py-2 font-medium">Price text</th>
              <th class="px-3 py-2 font-medium">Rarity</th>
              <th class="px-3 py-2 font-medium">Popularity</th>
              <th class="px-3 py-2 font-medium">Rating</th>
              <th class="px-3 py-2 font-medium">URL</th>
            </tr>
          </thead>
          <tbody>
            <template x-for="it in view" :key="it.link">
              <tr class="border-t border-slate-700 hover:bg-slate-700/50">
                <td class="px-3 py-2 min-w-[240px]" x-text="it.title || ''"></td>
                <td class="px-3 py-2 tabular-nums" x-text="it.price != null ? money(it.price) : ''"></td>
                <td class="px-3 py-2" x-text="it.priceText || ''"></td>
                <td class="px-3 py-2" x-text="it.rarity || ''"></td>
                <td class="px-3 py-2" x-text="it.popularity || ''"></td>
                <td class="px-3 py-2" x-text="it.rating || ''"></td>
                <td class="px-3 py-2 min-w-[260px]">
                  <a class="text-indigo-400 hover:underline" :href="it.link" target="_blank" rel="noreferrer" x-text="it.link"></a>
                </td>
              </tr>
            </template>
          </tbody>
        </table>
      </div>
    </div>

    <footer class="text-xs text-slate-500">
      Best-effort parser against public HTML. If the site markup changes, selectors need updating.
      Only <span class="font-mono">csgoskins.gg</span> is accepted by the API.
    </footer>
  </main>

  <script>
    const SEARCH_PAGE = 'https://csgoskins.gg/tournaments/2025-blast-austin/charm';

    function charms() {
      return {
        // form state
        player: '',

        // runtime state
        loading: false,
        error: null,
        steam: null,
        items: [],

        // view state
        query: '',
        sortKey: 'price',
        sortDir: 'desc',

        url() {
          if (!this.player.trim()) return SEARCH_PAGE + '?order=highest_price';
          const qs = new URLSearchParams({
            query: this.player.trim(),
            price_min: '', price_max: '', association: '', rarity_misc: '',
            player: '', map: '', order: 'popularity',
          });
          return `${SEARCH_PAGE}?${qs.toString()}`;
        },

        async scrape() {
          this.loading = true;
          this.error = null;
          this.steam = null;
          this.items = [];
          try {
            const res = await fetch('/api/scrape', {
              method: 'POST',
              headers: { 'content-type': 'application/json' },
              body: JSON.stringify({ url: this.url() }),
            });
            const data = await res.json();
            if (!res.ok) throw new Error((data && data.error) || `Request failed (${res.status})`);
            this.items = data.items || [];
            this.steam = data.externalMarketLink;
          } catch (e) {
            this.error = e.message;
          } finally {
            this.loading = false;
          }
        },

        get view() {
          const q = this.query.trim().toLowerCase();
          const base = this.items.filter(it => !q || (it.title || '').toLowerCase().includes(q));
          const dir = this.sortDir === 'asc' ? 1 : -1;
          return [...base].sort((a, b) => {
            if (this.sortKey === 'price') {
              const ap = a.price ?? -Infinity;
              const bp = b.price ?? -Infinity;
              return ap === bp ? 0 : (ap < bp ? -1 : 1) * dir;
            }
            return this.cmpText((a.title || '').toLowerCase(), (b.title || '').toLowerCase()) * dir;
          });
        },

        // code point order, same as /api/export
        cmpText(a, b) {
          const x = Array.from(a), y = Array.from(b);
          for (let i = 0; i < Math.min(x.length, y.length); i++) {
            const d = x[i].codePointAt(0) - y[i].codePointAt(0);
            if (d) return d < 0 ? -1 : 1;
          }
          return x.length === y.length ? 0 : (x.length < y.length ? -1 : 1);
        },

        money(p) {
          return '$' + Number(p).toFixed(2);
        },

        // CSV export: the server applies the same filter/sort to the items we send
        async exportCSV() {
          if (!this.view.length) return;
          const res = await fetch('/api/export', {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify({
              items: this.items,
              query: this.query,
              sortKey: this.sortKey,
              sortDir: this.sortDir,
            }),
          });
          if (!res.ok) { this.error = `Export failed (${res.status})`; return; }

          const blob = await res.blob();
          const url = URL.createObjectURL(blob);
          const a = document.createElement('a');
          a.href = url;
          a.download = 'charms.csv';
          document.body.appendChild(a);
          a.click();
          setTimeout(() => {
            document.body.removeChild(a);
            URL.revokeObjectURL(url);
          }, 0);
        },
      }
    }
  </script>
</body>
</html>
"#;
